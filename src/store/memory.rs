//! In-memory photo store for tests and local development.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;

use super::{Photo, PhotoDraft, PhotoQuery, PhotoStore};

/// Photo store held entirely in memory.
///
/// Implements the same ordering and cursor contract as `PgPhotoStore`:
/// records sort by `(created_at DESC, id DESC)` and the cursor is
/// strictly-after in that order.
#[derive(Default)]
pub struct MemoryPhotoStore {
    photos: RwLock<Vec<Photo>>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record with an explicit creation timestamp.
    ///
    /// Tests use this to build collections with a known display order.
    pub async fn seed(&self, draft: PhotoDraft, created_at: DateTime<Utc>) -> Photo {
        let photo = Photo {
            id: Uuid::new_v4(),
            image_url: draft.image_url,
            comment: draft.comment,
            location: draft.location,
            created_at,
        };
        self.photos.write().await.push(photo.clone());
        photo
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.photos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.photos.read().await.is_empty()
    }
}

/// Display order: newest first, ties broken by descending id.
fn display_order(a: &Photo, b: &Photo) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    async fn query(&self, query: PhotoQuery) -> Result<Vec<Photo>, StoreError> {
        let mut matched: Vec<Photo> = self
            .photos
            .read()
            .await
            .iter()
            .filter(|p| match query.location {
                Some(ref location) => p.location == *location,
                None => true,
            })
            .filter(|p| match query.after {
                Some(after) => (p.created_at, p.id) < (after.created_at, after.id),
                None => true,
            })
            .cloned()
            .collect();

        matched.sort_by(display_order);
        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn insert(&self, draft: PhotoDraft) -> Result<Photo, StoreError> {
        Ok(self.seed(draft, Utc::now()).await)
    }

    async fn locations(&self) -> Result<Vec<String>, StoreError> {
        let mut locations: Vec<String> = self
            .photos
            .read()
            .await
            .iter()
            .map(|p| p.location.clone())
            .collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }
}
