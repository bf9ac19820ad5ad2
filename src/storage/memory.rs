//! In-memory blob storage for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::error::StorageError;

use super::{object_key, BlobStorage};

/// Blob storage held entirely in memory.
///
/// Stored keys are retained so tests can assert which blobs exist; in
/// particular, that a blob stays behind when metadata creation fails.
#[derive(Default)]
pub struct MemoryBlobStorage {
    base_url: String,
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost/uploads".to_string(),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of blobs currently stored.
    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether a blob exists under the key portion of the given URL.
    pub async fn contains_url(&self, url: &str) -> bool {
        let key = url
            .strip_prefix(&self.base_url)
            .map(|k| k.trim_start_matches('/'))
            .unwrap_or(url);
        self.blobs.read().await.contains_key(key)
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn store(&self, data: Bytes, original_filename: &str) -> Result<String, StorageError> {
        let key = object_key(original_filename);
        self.blobs.write().await.insert(key.clone(), data);
        Ok(format!("{}/{}", self.base_url, key))
    }
}
