//! Gallery API integration tests.
//!
//! Tests verify:
//! - Page size and newest-first ordering in "all" mode
//! - Cursor continuation without duplicates or gaps
//! - Location mode returning the full set without pagination
//! - The locations endpoint
//! - Error cases (invalid cursor)

use axum::http::StatusCode;
use tower::ServiceExt;

use super::test_utils::{get, json_body, TestApp, PAGE_SIZE};

// =============================================================================
// All Mode Pagination
// =============================================================================

#[tokio::test]
async fn test_first_page_newest_first() {
    let app = TestApp::new();
    app.seed_photos(8, &["Tokyo", "Kyoto"]).await;

    let response = app.router.oneshot(get("/api/photos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), PAGE_SIZE as usize);

    // Seeded with increasing timestamps, so the newest is "photo 7"
    assert_eq!(photos[0]["comment"], "photo 7");
    assert_eq!(photos[4]["comment"], "photo 3");
    assert_eq!(body["has_more"], true);
    assert!(body["next_cursor"].is_string());
}

#[tokio::test]
async fn test_cursor_walk_covers_everything_once() {
    let app = TestApp::new();
    app.seed_photos(12, &["Tokyo"]).await;

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let uri = match &cursor {
            Some(c) => format!("/api/photos?cursor={c}"),
            None => "/api/photos".to_string(),
        };
        let response = app.router.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;

        for photo in body["photos"].as_array().unwrap() {
            seen.push(photo["comment"].as_str().unwrap().to_string());
        }
        if body["has_more"] != true {
            break;
        }
        cursor = Some(body["next_cursor"].as_str().unwrap().to_string());
    }

    // All 12 records, newest first, no duplicates or gaps
    let expected: Vec<String> = (0..12).rev().map(|i| format!("photo {i}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_exact_multiple_ends_with_empty_page() {
    let app = TestApp::new();
    app.seed_photos(PAGE_SIZE as usize, &["Tokyo"]).await;

    // A full first page still reports has_more: the store cannot tell a
    // full page from the end of the collection
    let response = app.router.clone().oneshot(get("/api/photos")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), PAGE_SIZE as usize);
    assert_eq!(body["has_more"], true);

    let cursor = body["next_cursor"].as_str().unwrap().to_string();
    let response = app
        .router
        .oneshot(get(&format!("/api/photos?cursor={cursor}")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), 0);
    assert_eq!(body["has_more"], false);
    assert!(body.get("next_cursor").is_none());
}

#[tokio::test]
async fn test_empty_collection() {
    let app = TestApp::new();

    let response = app.router.oneshot(get("/api/photos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), 0);
    assert_eq!(body["has_more"], false);
}

// =============================================================================
// Location Mode
// =============================================================================

#[tokio::test]
async fn test_location_filter_returns_full_set() {
    let app = TestApp::new();
    // 12 photos over two locations: 6 each, more than one page's worth
    app.seed_photos(12, &["Tokyo", "Kyoto"]).await;

    let response = app
        .router
        .oneshot(get("/api/photos?location=Tokyo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let photos = body["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 6);
    for photo in photos {
        assert_eq!(photo["location"], "Tokyo");
    }

    // Pagination is disabled in location mode
    assert_eq!(body["has_more"], false);
    assert!(body.get("next_cursor").is_none());
}

#[tokio::test]
async fn test_location_filter_exact_match_only() {
    let app = TestApp::new();
    app.seed_photos(4, &["Tokyo"]).await;

    let response = app
        .router
        .oneshot(get("/api/photos?location=tokyo"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_all_sentinel_means_no_filter() {
    let app = TestApp::new();
    app.seed_photos(3, &["Tokyo", "Kyoto"]).await;

    let response = app
        .router
        .oneshot(get("/api/photos?location=all"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cursor_ignored_in_location_mode() {
    let app = TestApp::new();
    app.seed_photos(6, &["Tokyo"]).await;

    // Even a garbage cursor is ignored when a location filter is active
    let response = app
        .router
        .oneshot(get("/api/photos?location=Tokyo&cursor=not-a-cursor"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["photos"].as_array().unwrap().len(), 6);
}

// =============================================================================
// Locations Endpoint
// =============================================================================

#[tokio::test]
async fn test_locations_sorted_distinct() {
    let app = TestApp::new();
    app.seed_photos(9, &["Tokyo", "Kyoto", "Osaka"]).await;

    let response = app.router.oneshot(get("/api/locations")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body["locations"],
        serde_json::json!(["Kyoto", "Osaka", "Tokyo"])
    );
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_invalid_cursor_rejected() {
    let app = TestApp::new();
    app.seed_photos(3, &["Tokyo"]).await;

    let response = app
        .router
        .oneshot(get("/api/photos?cursor=@@not-base64@@"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid_cursor");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}
