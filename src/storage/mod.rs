//! Blob storage for uploaded images.
//!
//! The `BlobStorage` trait abstracts the object store: one operation, "store
//! these bytes under a generated unique key and give back a publicly
//! fetchable URL". Keys are a fresh UUIDv4 plus the original file's
//! extension, under a fixed `photos/` folder.

mod memory;
mod s3;

pub use memory::MemoryBlobStorage;
pub use s3::{create_s3_client, S3BlobStorage};

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::error::StorageError;

/// Fixed logical folder for uploaded photos.
pub const PHOTOS_FOLDER: &str = "photos";

/// Trait for storing uploaded blobs.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store a blob under a generated unique key and return its public URL.
    ///
    /// `original_filename` is used only for its extension.
    async fn store(&self, data: Bytes, original_filename: &str) -> Result<String, StorageError>;
}

/// Generate a unique object key for an uploaded file.
///
/// The key is `photos/{uuid}{.ext}` where the extension is taken from the
/// original filename if it has one.
pub fn object_key(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    format!("{}/{}{}", PHOTOS_FOLDER, Uuid::new_v4(), extension)
}

/// Guess a content type from a file extension for the stored object.
pub(crate) fn content_type_for(key: &str) -> &'static str {
    match Path::new(key).extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
