//! Photo record store.
//!
//! This module defines the photo record model and the `PhotoStore` trait that
//! abstracts the backing document collection. Records are append-only: there
//! is no update or delete operation anywhere in the system, and display
//! ordering is always descending by creation timestamp (ties broken by id).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │    gallery / upload / HTTP handlers     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            PhotoStore Trait             │
//! │   (query / insert / distinct locations) │
//! └────────────────────┬────────────────────┘
//!                      │
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │  PgPhotoStore   │    │  MemoryPhotoStore   │
//! │  (production)   │    │  (tests, local dev) │
//! └─────────────────┘    └─────────────────────┘
//! ```

mod memory;
mod postgres;
mod record;

pub use memory::MemoryPhotoStore;
pub use postgres::{connect_pool, PgPhotoStore};
pub use record::{Photo, PhotoCursor, PhotoDraft};

use async_trait::async_trait;

use crate::error::StoreError;

/// A query against the photo collection.
///
/// The shape mirrors what the backing collection can answer efficiently: one
/// optional equality predicate, a fixed sort key, an optional limit, and an
/// optional strictly-after cursor.
#[derive(Debug, Clone, Default)]
pub struct PhotoQuery {
    /// Equality predicate on the location field
    pub location: Option<String>,

    /// Maximum number of records to return (None = no limit)
    pub limit: Option<u32>,

    /// Return only records strictly after this cursor in display order
    pub after: Option<PhotoCursor>,
}

impl PhotoQuery {
    /// Query for the most recent records, optionally continuing after a cursor.
    pub fn recent(limit: u32, after: Option<PhotoCursor>) -> Self {
        Self {
            location: None,
            limit: Some(limit),
            after,
        }
    }

    /// Query for every record matching a location, unpaginated.
    pub fn at_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            limit: None,
            after: None,
        }
    }
}

/// Trait for the backing photo record collection.
///
/// Implementations must return records ordered by `(created_at DESC, id
/// DESC)` and treat the cursor as strictly-after in that order. A query that
/// matches nothing returns an empty vector, never an error.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Run a query against the collection.
    async fn query(&self, query: PhotoQuery) -> Result<Vec<Photo>, StoreError>;

    /// Insert one record. The id and creation timestamp are assigned by the
    /// backend; the returned record carries them.
    async fn insert(&self, draft: PhotoDraft) -> Result<Photo, StoreError>;

    /// Distinct location values across the collection, sorted ascending.
    async fn locations(&self) -> Result<Vec<String>, StoreError>;
}
