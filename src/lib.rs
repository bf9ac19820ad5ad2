//! # Photostream
//!
//! A photo gallery server backed by Postgres records and S3-compatible
//! object storage.
//!
//! This library provides the core functionality for a public, paginated,
//! location-filterable photo gallery with an access-gated admin upload page.
//! Photo metadata lives in a Postgres table; image blobs live in object
//! storage under uploader-independent generated names.
//!
//! ## Features
//!
//! - **Keyset pagination**: Fixed-size gallery pages ordered newest-first,
//!   continued via opaque cursors
//! - **Location filter**: An exact-match filter that returns the complete
//!   matching set in one response
//! - **Gated uploads**: HMAC-SHA256 signed session cookies protect the
//!   admin surface; the public gallery needs no sign-in
//! - **Pluggable backends**: The record store and blob storage are traits
//!   with Postgres/S3 and in-memory implementations
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`store`] - Photo records, cursors, and the Postgres store
//! - [`storage`] - Image blob storage over S3
//! - [`gallery`] - Page assembly and the stateful gallery view
//! - [`upload`] - Upload validation and submission
//! - [`auth`] - Sessions, credentials, and the access gate
//! - [`server`] - Axum-based HTTP server, handlers, and pages
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use photostream::auth::{AdminCredentials, SessionAuth};
//! use photostream::server::{create_router, AppState, RouterConfig};
//! use photostream::storage::MemoryBlobStorage;
//! use photostream::store::MemoryPhotoStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(
//!         Arc::new(MemoryPhotoStore::new()),
//!         Arc::new(MemoryBlobStorage::new()),
//!         SessionAuth::new("a-secret-key-of-at-least-32-bytes", Duration::from_secs(86_400)),
//!         AdminCredentials::new("admin@example.com", "hunter2hunter2"),
//!         5,
//!     );
//!     let router = create_router(state, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gallery;
pub mod server;
pub mod storage;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use auth::{access_gate, AdminCredentials, AuthError, Identity, SessionAuth, SESSION_COOKIE};
pub use config::Config;
pub use error::{StorageError, StoreError, UploadError};
pub use gallery::{fetch_page, GalleryFilter, GalleryPage, GallerySnapshot, GalleryView, DEFAULT_PAGE_SIZE};
pub use server::{create_router, AppState, ErrorResponse, RouterConfig};
pub use storage::{
    create_s3_client, BlobStorage, MemoryBlobStorage, S3BlobStorage, PHOTOS_FOLDER,
};
pub use store::{
    connect_pool, MemoryPhotoStore, PgPhotoStore, Photo, PhotoCursor, PhotoDraft, PhotoQuery,
    PhotoStore,
};
pub use upload::{submit, UploadForm};
