//! Test utilities for integration tests.
//!
//! This module provides helpers for building a router over the in-memory
//! backends, seeding photo records with controlled timestamps, and issuing
//! multipart upload requests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;

use photostream::auth::{AdminCredentials, SessionAuth, SESSION_COOKIE};
use photostream::server::{create_router, AppState, RouterConfig};
use photostream::storage::MemoryBlobStorage;
use photostream::store::{MemoryPhotoStore, PhotoDraft};

pub const TEST_SECRET: &str = "integration-test-secret-key-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "hunter2hunter2";
pub const PAGE_SIZE: u32 = 5;

// =============================================================================
// Test Application
// =============================================================================

/// A router over in-memory backends, with handles kept for inspection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryPhotoStore>,
    pub storage: Arc<MemoryBlobStorage>,
    pub auth: SessionAuth,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryPhotoStore::new());
        let storage = Arc::new(MemoryBlobStorage::new());
        let auth = SessionAuth::new(TEST_SECRET, Duration::from_secs(3600));

        let state = AppState::new(
            Arc::clone(&store) as _,
            Arc::clone(&storage) as _,
            auth.clone(),
            AdminCredentials::new(ADMIN_EMAIL, ADMIN_PASSWORD),
            PAGE_SIZE,
        );

        let router = create_router(state, RouterConfig::new().with_tracing(false));

        Self {
            router,
            store,
            storage,
            auth,
        }
    }

    /// Seed `count` photos at distinct, strictly increasing timestamps.
    ///
    /// Locations cycle through the given list. Returns nothing; records are
    /// readable back through the API in newest-first order.
    pub async fn seed_photos(&self, count: usize, locations: &[&str]) {
        for i in 0..count {
            let location = locations[i % locations.len()];
            self.store
                .seed(
                    PhotoDraft {
                        image_url: format!("http://localhost/uploads/photos/{i}.jpg"),
                        comment: format!("photo {i}"),
                        location: location.to_string(),
                    },
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, i as u32).unwrap(),
                )
                .await;
        }
    }

    /// A Cookie header value carrying a valid admin session.
    pub fn session_cookie(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.auth.issue(ADMIN_EMAIL))
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Build a GET request for the given URI.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Build a GET request carrying the given Cookie header.
pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart upload request for /admin/upload.
///
/// Any of the three fields can be omitted to exercise validation.
pub fn upload_request(
    cookie: Option<&str>,
    file: Option<(&str, &[u8])>,
    comment: Option<&str>,
    location: Option<&str>,
) -> Request<Body> {
    const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

    let mut body = Vec::new();
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in [("comment", comment), ("location", location)] {
        if let Some(value) = value {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/admin/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Build a urlencoded login form POST.
pub fn login_request(email: &str, password: &str) -> Request<Body> {
    let body = format!(
        "email={}&password={}",
        urlencode(email),
        urlencode(password)
    );
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn urlencode(value: &str) -> String {
    value.replace('@', "%40").replace('+', "%2B")
}

/// Collect a response body and parse it as JSON.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
