//! Jokes fetched from the upstream API and jokes saved by the client

use std::convert::Infallible;

use serde::Serialize;

use crate::store::{Resource, ResourceId};

/// Timestamp fields jokes can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeTimestamp {
    FetchedAt,
}

/// A joke the client chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJoke {
    pub id: ResourceId,
    pub category: String,
    pub text: String,
    pub fetched_at: String,
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedJokeDraft {
    pub category: String,
    pub text: String,
    pub fetched_at: String,
    pub saved_at: String,
}

impl Resource for SavedJoke {
    type Draft = SavedJokeDraft;
    type Update = Infallible;
    type SortField = JokeTimestamp;

    const KIND: &'static str = "saved joke";

    fn mint(id: ResourceId, draft: SavedJokeDraft) -> Self {
        Self {
            id,
            category: draft.category,
            text: draft.text,
            fetched_at: draft.fetched_at,
            saved_at: draft.saved_at,
        }
    }

    fn id(&self) -> ResourceId {
        self.id
    }

    fn apply(&mut self, update: Infallible) {
        match update {}
    }

    fn sort_key(&self, field: JokeTimestamp) -> &str {
        match field {
            JokeTimestamp::FetchedAt => &self.fetched_at,
        }
    }
}

/// A joke as returned by the upstream API, cached on fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedJoke {
    pub id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<u64>,
    pub category: String,
    pub text: String,
    pub fetched_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedJokeDraft {
    pub external_id: Option<u64>,
    pub category: String,
    pub text: String,
    pub fetched_at: String,
}

impl Resource for FetchedJoke {
    type Draft = FetchedJokeDraft;
    type Update = Infallible;
    type SortField = JokeTimestamp;

    const KIND: &'static str = "fetched joke";

    fn mint(id: ResourceId, draft: FetchedJokeDraft) -> Self {
        Self {
            id,
            external_id: draft.external_id,
            category: draft.category,
            text: draft.text,
            fetched_at: draft.fetched_at,
        }
    }

    fn id(&self) -> ResourceId {
        self.id
    }

    fn apply(&mut self, update: Infallible) {
        match update {}
    }

    fn sort_key(&self, field: JokeTimestamp) -> &str {
        match field {
            JokeTimestamp::FetchedAt => &self.fetched_at,
        }
    }
}
