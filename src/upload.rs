//! Upload submission.
//!
//! Validates the form, stores the image blob, then creates the metadata
//! record. The two side effects are strictly sequential and
//! non-transactional: if the record insert fails after the blob upload
//! succeeded, the blob is left orphaned in storage. There is no
//! compensating delete anywhere in the system.

use bytes::Bytes;
use tracing::info;

use crate::error::UploadError;
use crate::storage::BlobStorage;
use crate::store::{Photo, PhotoDraft, PhotoStore};

/// The submitted upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// Image bytes, if a file was attached
    pub file: Option<Bytes>,

    /// Original filename of the attached file (used for its extension)
    pub file_name: String,

    pub comment: String,
    pub location: String,
}

/// Submit an upload: validate, store the blob, create the record.
///
/// Validation order is fixed: file presence, then comment, then location.
/// A validation failure makes no network call. Returns the created record;
/// the error's `Display` text is the operator-facing status message.
pub async fn submit<B, S>(storage: &B, store: &S, form: UploadForm) -> Result<Photo, UploadError>
where
    B: BlobStorage + ?Sized,
    S: PhotoStore + ?Sized,
{
    let file = form.file.ok_or(UploadError::MissingFile)?;
    if form.comment.trim().is_empty() {
        return Err(UploadError::MissingComment);
    }
    if form.location.trim().is_empty() {
        return Err(UploadError::MissingLocation);
    }

    let image_url = storage.store(file, &form.file_name).await?;

    // From here on a failure orphans the uploaded blob; that window is
    // accepted rather than papered over with a delete that could also fail.
    let photo = store
        .insert(PhotoDraft {
            image_url,
            comment: form.comment,
            location: form.location,
        })
        .await?;

    info!(id = %photo.id, location = %photo.location, "photo uploaded");
    Ok(photo)
}
