//! Error types for the store, storage, and upload layers.

use thiserror::Error;

/// Errors from the photo record store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backend rejected the operation due to missing permission
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A pagination cursor could not be decoded
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Network or connection error reaching the backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other backend failure, surfaced verbatim
    #[error("Store error: {0}")]
    Backend(String),
}

/// Errors from blob storage.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backend rejected the write due to missing permission
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Network or connection error reaching the backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other storage failure, surfaced verbatim
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Errors from upload submission.
///
/// Validation variants are produced before any network call is made. The
/// `Display` text of each variant is the operator-facing status message;
/// permission problems collapse into one fixed message while other backend
/// failures carry their text verbatim.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// No file was attached to the form
    #[error("Select a photo file before uploading")]
    MissingFile,

    /// The comment field was empty
    #[error("A comment is required")]
    MissingComment,

    /// The location field was empty
    #[error("A location is required")]
    MissingLocation,

    /// Either backend rejected the write due to missing permission
    #[error("You do not have permission to upload")]
    PermissionDenied,

    /// The blob upload failed
    #[error("{0}")]
    Storage(String),

    /// The metadata record could not be created (the blob stays in storage)
    #[error("{0}")]
    Store(String),
}

impl UploadError {
    /// Whether this error was raised by validation, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::MissingFile | UploadError::MissingComment | UploadError::MissingLocation
        )
    }
}

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PermissionDenied(_) => UploadError::PermissionDenied,
            other => UploadError::Storage(other.to_string()),
        }
    }
}

impl From<StoreError> for UploadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PermissionDenied(_) => UploadError::PermissionDenied,
            other => UploadError::Store(other.to_string()),
        }
    }
}
