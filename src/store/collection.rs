//! Lock-guarded resource collection

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StoreError, StoreResult};
use super::{Resource, ResourceId};

struct Inner<R> {
    items: Vec<R>,
    next_id: u64,
}

/// Insertion-ordered set of resources with a monotonic id counter
pub struct Collection<R: Resource> {
    inner: RwLock<Inner<R>>,
}

impl<R: Resource> Collection<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner<R>>> {
        self.inner.read().map_err(|_| StoreError::Poisoned(R::KIND))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner<R>>> {
        self.inner.write().map_err(|_| StoreError::Poisoned(R::KIND))
    }

    fn not_found(id: ResourceId) -> StoreError {
        StoreError::NotFound {
            collection: R::KIND,
            id,
        }
    }

    /// Snapshot of every resource in insertion order
    pub fn list(&self) -> StoreResult<Vec<R>> {
        Ok(self.read()?.items.clone())
    }

    /// Snapshot ordered by `field`, greatest first
    ///
    /// The sort is stable, so resources with equal keys keep their insertion
    /// order. The collection itself is left untouched.
    pub fn list_sorted_by_desc(&self, field: R::SortField) -> StoreResult<Vec<R>> {
        let mut items = self.list()?;
        items.sort_by(|a, b| b.sort_key(field).cmp(a.sort_key(field)));
        Ok(items)
    }

    /// Snapshot ordered by `field`, greatest first, ties newest first
    ///
    /// Ids are minted in insertion order, so equal keys fall back to
    /// descending id.
    pub fn list_newest_first(&self, field: R::SortField) -> StoreResult<Vec<R>> {
        let mut items = self.list()?;
        items.sort_by(|a, b| {
            b.sort_key(field)
                .cmp(a.sort_key(field))
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(items)
    }

    /// Append a new resource under a freshly minted id
    pub fn insert(&self, draft: R::Draft) -> StoreResult<R> {
        let mut inner = self.write()?;

        let raw = inner.next_id;
        let id = ResourceId::from_raw(raw).ok_or(StoreError::IdSpaceExhausted(R::KIND))?;
        inner.next_id = raw
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted(R::KIND))?;

        let resource = R::mint(id, draft);
        inner.items.push(resource.clone());
        Ok(resource)
    }

    pub fn find_by_id(&self, id: ResourceId) -> StoreResult<R> {
        self.read()?
            .items
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    /// Mutate one field of the resource in place and return the result
    pub fn update_field(&self, id: ResourceId, update: R::Update) -> StoreResult<R> {
        let mut inner = self.write()?;

        let resource = inner
            .items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        resource.apply(update);
        Ok(resource.clone())
    }

    /// Remove the resource, keeping the relative order of the rest
    pub fn remove_by_id(&self, id: ResourceId) -> StoreResult<R> {
        let mut inner = self.write()?;

        let idx = inner
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        Ok(inner.items.remove(idx))
    }

    /// Drop the oldest resources until at most `limit` remain
    ///
    /// Returns the number of resources removed.
    pub fn retain_newest(&self, limit: usize) -> StoreResult<usize> {
        let mut inner = self.write()?;

        let excess = inner.items.len().saturating_sub(limit);
        inner.items.drain(..excess);
        Ok(excess)
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.items.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R: Resource> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}
