//! HTTP request handlers for the gallery and admin APIs.
//!
//! # Endpoints
//!
//! - `GET /api/photos` - Gallery page query (filter + cursor)
//! - `GET /api/locations` - Distinct locations for the filter dropdown
//! - `POST /admin/upload` - Multipart photo upload (gated)
//! - `POST /login`, `POST /logout` - Session management
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::auth::{AdminCredentials, Identity, SessionAuth, SESSION_COOKIE};
use crate::error::{StoreError, UploadError};
use crate::gallery::{fetch_page, GalleryFilter};
use crate::storage::BlobStorage;
use crate::store::{Photo, PhotoCursor, PhotoStore};
use crate::upload::{self, UploadForm};

use super::pages;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The photo record collection
    pub store: Arc<dyn PhotoStore>,

    /// The image blob store
    pub storage: Arc<dyn BlobStorage>,

    /// Session token authenticator
    pub auth: SessionAuth,

    /// The configured admin credential
    pub credentials: AdminCredentials,

    /// Fixed page size for "all" mode
    pub page_size: u32,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PhotoStore>,
        storage: Arc<dyn BlobStorage>,
        auth: SessionAuth,
        credentials: AdminCredentials,
        page_size: u32,
    ) -> Self {
        Self {
            store,
            storage,
            auth,
            credentials,
            page_size,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the photos endpoint.
#[derive(Debug, Deserialize)]
pub struct PhotosQueryParams {
    /// Location filter; absent or `"all"` means no filter
    #[serde(default)]
    pub location: Option<String>,

    /// Continuation cursor from a previous response (only meaningful
    /// without a location filter)
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Form body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_cursor", "store_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One photo record on the wire.
#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub image_url: String,
    pub comment: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            image_url: photo.image_url,
            comment: photo.comment,
            location: photo.location,
            created_at: photo.created_at,
        }
    }
}

/// Response from the photos endpoint.
#[derive(Debug, Serialize)]
pub struct PhotosResponse {
    pub photos: Vec<PhotoResponse>,

    /// Cursor for the next page (absent when pagination has ended or a
    /// location filter is active)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Whether a further page may exist
    pub has_more: bool,
}

/// Response from the locations endpoint.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

/// Response from the upload endpoint. `status` is the operator-facing
/// message; failures carry an `Error:` marker, successes never do.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub status: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Wrapper mapping store errors onto HTTP responses.
pub struct ApiError(pub StoreError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            StoreError::InvalidCursor(_) => (StatusCode::BAD_REQUEST, "invalid_cursor"),
            StoreError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "permission_denied"),
            StoreError::Connection(_) => (StatusCode::BAD_GATEWAY, "connection_error"),
            StoreError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        (status, Json(ErrorResponse::new(error_type, message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

// =============================================================================
// Gallery API
// =============================================================================

/// Handle gallery page queries.
///
/// # Endpoint
///
/// `GET /api/photos?location=<value>&cursor=<token>`
///
/// Without a location filter (or with the sentinel `all`) the response is
/// one fixed-size page plus a continuation cursor; with a location filter
/// the response is the complete matching set and pagination is disabled.
/// A cursor sent alongside a location filter is ignored.
pub async fn photos_handler(
    State(state): State<AppState>,
    Query(params): Query<PhotosQueryParams>,
) -> Result<Json<PhotosResponse>, ApiError> {
    let filter = GalleryFilter::from_param(params.location.as_deref());

    let after = match (&filter, params.cursor.as_deref()) {
        (GalleryFilter::All, Some(cursor)) => Some(PhotoCursor::decode(cursor)?),
        _ => None,
    };

    let page = fetch_page(state.store.as_ref(), &filter, after.as_ref(), state.page_size).await?;

    Ok(Json(PhotosResponse {
        next_cursor: page.next_cursor.map(|c| c.encode()),
        has_more: page.has_more,
        photos: page.photos.into_iter().map(PhotoResponse::from).collect(),
    }))
}

/// Handle location list requests.
///
/// # Endpoint
///
/// `GET /api/locations`
///
/// Returns the distinct location values across the collection, sorted
/// ascending. The `all` sentinel is a client-side convention and is not
/// included.
pub async fn locations_handler(
    State(state): State<AppState>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let locations = state.store.locations().await?;
    Ok(Json(LocationsResponse { locations }))
}

// =============================================================================
// Upload
// =============================================================================

/// Handle photo uploads.
///
/// # Endpoint
///
/// `POST /admin/upload` (multipart form: `file`, `comment`, `location`)
///
/// Requires a verified identity (attached by the access gate). The response
/// always carries the operator-facing status string; the HTTP status
/// distinguishes validation (400), permission (403), and backend (502)
/// failures.
pub async fn upload_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    mut multipart: Multipart,
) -> Response {
    debug!(subject = %identity.subject, "upload request");

    let mut form = UploadForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                let body = UploadResponse {
                    ok: false,
                    status: format!("Error: {err}"),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        };

        match field.name().unwrap_or_default().to_string().as_str() {
            "file" => {
                form.file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) if !bytes.is_empty() => form.file = Some(bytes),
                    Ok(_) => {}
                    Err(err) => {
                        let body = UploadResponse {
                            ok: false,
                            status: format!("Error: {err}"),
                        };
                        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
                    }
                }
            }
            "comment" => form.comment = field.text().await.unwrap_or_default(),
            "location" => form.location = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    match upload::submit(state.storage.as_ref(), state.store.as_ref(), form).await {
        Ok(_) => {
            let body = UploadResponse {
                ok: true,
                status: "Upload complete".to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            let status = match &err {
                e if e.is_validation() => StatusCode::BAD_REQUEST,
                UploadError::PermissionDenied => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_GATEWAY,
            };
            warn!(status = status.as_u16(), "upload failed: {err}");
            let body = UploadResponse {
                ok: false,
                status: format!("Error: {err}"),
            };
            (status, Json(body)).into_response()
        }
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Handle login form submissions.
///
/// # Endpoint
///
/// `POST /login` (form: `email`, `password`)
///
/// A correct credential pair sets the session cookie and redirects to the
/// admin page; anything else re-renders the sign-in page with an error.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.credentials.verify(&form.email, &form.password) {
        warn!("failed login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Html(pages::login_page(Some("Incorrect email or password"))),
        )
            .into_response();
    }

    let token = state.auth.issue(&form.email);
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to("/admin"),
    )
        .into_response()
}

/// Handle sign-out.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Clears the session cookie and redirects to the gallery.
pub async fn logout_handler() -> Response {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

// =============================================================================
// Pages and Health
// =============================================================================

/// Serve the public gallery page.
pub async fn gallery_page_handler() -> Html<String> {
    Html(pages::gallery_page())
}

/// Serve the sign-in page.
pub async fn login_page_handler() -> Html<String> {
    Html(pages::login_page(None))
}

/// Serve the admin upload page. Reached only through the access gate.
pub async fn admin_page_handler(Extension(identity): Extension<Identity>) -> Html<String> {
    Html(pages::admin_page(&identity.subject))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
