//! Photo record model and pagination cursor.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// One photo record as stored in the collection.
///
/// Records are created once by upload submission and never updated or
/// deleted. The id and creation timestamp are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Backend-assigned unique identifier
    pub id: Uuid,

    /// Publicly fetchable URL of the uploaded image
    pub image_url: String,

    /// Free-text comment, non-empty at submission time
    pub comment: String,

    /// Free-text location, non-empty at submission time; the filter key
    pub location: String,

    /// Backend-assigned creation timestamp; the sole sort key
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// The pagination cursor pointing at this record.
    pub fn cursor(&self) -> PhotoCursor {
        PhotoCursor {
            created_at: self.created_at,
            id: self.id,
        }
    }
}

impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for Photo {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Self {
            id: row.try_get("id")?,
            image_url: row.try_get("image_url")?,
            comment: row.try_get("comment")?,
            location: row.try_get("location")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Caller-supplied fields of a new photo record.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDraft {
    pub image_url: String,
    pub comment: String,
    pub location: String,
}

/// Opaque keyset cursor pointing at the last record of a loaded page.
///
/// Carries the full sort key `(created_at, id)` so the next page can be
/// requested without re-scanning prior results, even when timestamps tie.
/// Encoded as URL-safe base64 over the JSON form for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl PhotoCursor {
    /// Encode for transport in a query parameter.
    pub fn encode(&self) -> String {
        // Serializing a (DateTime, Uuid) pair cannot fail
        let json = serde_json::to_string(self).expect("cursor serialization");
        general_purpose::URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a cursor received from a client.
    pub fn decode(encoded: &str) -> Result<Self, StoreError> {
        let bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| StoreError::InvalidCursor(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidCursor(e.to_string()))
    }
}
