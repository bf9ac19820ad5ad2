//! Router configuration for the photostream server.
//!
//! This module defines the HTTP routes and applies middleware for the admin
//! access gate, CORS, request tracing, and the upload body limit.
//!
//! # Route Structure
//!
//! ```text
//! /                  - Gallery page (public)
//! /login             - Sign-in page and form target (public)
//! /logout            - Sign-out (public)
//! /health            - Health check (public)
//! /api/photos        - Gallery page query (public)
//! /api/locations     - Location filter values (public)
//! /admin             - Upload page (gated)
//! /admin/upload      - Multipart upload (gated)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use photostream::server::{create_router, AppState, RouterConfig};
//!
//! let state = AppState::new(store, storage, auth, credentials, 5);
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(state, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::access_gate;

use super::handlers::{
    admin_page_handler, gallery_page_handler, health_handler, locations_handler,
    login_handler, login_page_handler, logout_handler, photos_handler, upload_handler,
    AppState,
};

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Maximum accepted upload request body, in bytes
    pub max_upload_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Upload bodies are capped at 20 MiB
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            max_upload_bytes: 20 * 1024 * 1024,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the maximum upload body size in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (pages, session endpoints, gallery API, health check)
/// - Gated admin routes (upload page and endpoint)
/// - CORS configuration
/// - Upload body size limit
/// - Request tracing (optional)
pub fn create_router(state: AppState, config: RouterConfig) -> Router {
    let cors = build_cors_layer(&config);

    // Gate is applied to the nested router AFTER nesting so it sees the
    // full /admin/... path
    let admin_routes = Router::new()
        .route("/", get(admin_page_handler))
        .route("/upload", post(upload_handler))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            access_gate,
        ));

    let public_routes = Router::new()
        .route("/", get(gallery_page_handler))
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .route("/api/photos", get(photos_handler))
        .route("/api/locations", get(locations_handler));

    // The axum default 2 MB body limit is replaced by the configured cap
    let router = Router::new()
        .nest("/admin", admin_routes)
        .merge(public_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}
