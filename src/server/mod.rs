//! HTTP server layer for the photostream.
//!
//! This module provides the public gallery pages and JSON API, plus the
//! gated admin upload surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │     GET /api/photos        POST /admin/upload (gated)           │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    pages    │  │        routes           │  │
//! │  │ (requests)  │  │   (HTML)    │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod pages;
pub mod routes;

pub use handlers::{
    admin_page_handler, gallery_page_handler, health_handler, locations_handler, login_handler,
    login_page_handler, logout_handler, photos_handler, upload_handler, ApiError, AppState,
    ErrorResponse, HealthResponse, LocationsResponse, LoginForm, PhotoResponse,
    PhotosQueryParams, PhotosResponse, UploadResponse,
};
pub use routes::{create_router, RouterConfig};
