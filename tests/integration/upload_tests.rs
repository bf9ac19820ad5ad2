//! Upload integration tests.
//!
//! Tests verify:
//! - A valid multipart upload stores a blob and creates a record
//! - The stored record appears at the head of the gallery
//! - Validation order (file, then comment, then location) and messages
//! - Validation failures touch neither backend
//! - Status strings carry the Error: marker only on failure

use axum::http::StatusCode;
use tower::ServiceExt;

use super::test_utils::{get, json_body, upload_request, TestApp};

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_upload_success() {
    let app = TestApp::new();
    let cookie = app.session_cookie();

    let request = upload_request(
        Some(&cookie),
        Some(("sunset.JPG", b"jpeg bytes")),
        Some("sunset over the bay"),
        Some("Lisbon"),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    let status = body["status"].as_str().unwrap();
    assert!(!status.contains("Error:"));

    // The blob landed in storage and the record is queryable
    assert_eq!(app.storage.blob_count().await, 1);
    assert_eq!(app.store.len().await, 1);

    let response = app.router.oneshot(get("/api/photos")).await.unwrap();
    let body = json_body(response).await;
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["comment"], "sunset over the bay");
    assert_eq!(photos[0]["location"], "Lisbon");

    // Generated name under the photos folder, extension lowercased
    let image_url = photos[0]["image_url"].as_str().unwrap();
    assert!(image_url.contains("/photos/"));
    assert!(image_url.ends_with(".jpg"));
    assert!(app.storage.contains_url(image_url).await);
}

#[tokio::test]
async fn test_uploaded_photo_is_newest() {
    let app = TestApp::new();
    app.seed_photos(3, &["Tokyo"]).await;
    let cookie = app.session_cookie();

    let request = upload_request(
        Some(&cookie),
        Some(("new.jpg", b"bytes")),
        Some("latest"),
        Some("Tokyo"),
    );
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.oneshot(get("/api/photos")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["photos"][0]["comment"], "latest");
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_file_rejected_first() {
    let app = TestApp::new();
    let cookie = app.session_cookie();

    // Comment and location are also missing; the file error wins
    let request = upload_request(Some(&cookie), None, None, None);
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["status"], "Error: Select a photo file before uploading");
}

#[tokio::test]
async fn test_missing_comment_rejected() {
    let app = TestApp::new();
    let cookie = app.session_cookie();

    let request = upload_request(
        Some(&cookie),
        Some(("a.jpg", b"bytes")),
        Some("   "),
        Some("Tokyo"),
    );
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["status"], "Error: A comment is required");
}

#[tokio::test]
async fn test_missing_location_rejected() {
    let app = TestApp::new();
    let cookie = app.session_cookie();

    let request = upload_request(
        Some(&cookie),
        Some(("a.jpg", b"bytes")),
        Some("a comment"),
        None,
    );
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["status"], "Error: A location is required");
}

#[tokio::test]
async fn test_validation_failure_touches_no_backend() {
    let app = TestApp::new();
    let cookie = app.session_cookie();

    let request = upload_request(Some(&cookie), None, Some("c"), Some("l"));
    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.storage.blob_count().await, 0);
    assert_eq!(app.store.len().await, 0);
}
