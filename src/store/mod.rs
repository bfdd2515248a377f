//! # Collection Store
//!
//! In-memory, insertion-ordered collections of resources.
//!
//! Each [`Collection`] owns its resources and an id counter. Identifiers are
//! minted by the collection, increase strictly and are never reused, even
//! after the resource holding them has been removed. All reads and writes go
//! through one lock per collection, so at most one writer is active at a time.
//!
//! The store trusts its callers: commands reaching it have already been
//! validated, and no field is re-checked here.

mod collection;
mod errors;

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

pub use collection::Collection;
pub use errors::{StoreError, StoreResult};

/// Identifier of a resource within its collection
///
/// Always positive; the first resource of a collection gets id 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(NonZeroU64);

impl ResourceId {
    /// Build an id from a raw value, rejecting zero
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record kept in a [`Collection`]
///
/// The associated types describe what the store may do with a resource:
/// `Draft` is what a create carries (everything but the id), `Update` is the
/// closed set of in-place field mutations, and `SortField` names the fields
/// reads may order by.
pub trait Resource: Clone + Send + Sync + 'static {
    type Draft;
    type Update;
    type SortField: Copy;

    /// Singular name used in error messages ("task", "saved joke")
    const KIND: &'static str;

    /// Construct the resource from a freshly minted id
    fn mint(id: ResourceId, draft: Self::Draft) -> Self;

    fn id(&self) -> ResourceId;

    /// Apply a single-field mutation in place
    fn apply(&mut self, update: Self::Update);

    /// Sort key for `field`; compared lexically
    fn sort_key(&self, field: Self::SortField) -> &str;
}
