//! End-to-end router tests: the five CRUD routes driven over HTTP against the
//! in-memory store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use registrar::testkit::MemStore;
use registrar::{app_router, AppState, STUDENT};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    app_router(AppState {
        store: Arc::new(MemStore::new()),
        entity: &STUDENT,
    })
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: GET /health and GET /version respond
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_and_version_respond() {
    let app = app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");

    let response = get(&app, "/version").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["name"], "registrar");
    assert!(json["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: GET / renders the empty collection view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_starts_empty() {
    let app = app();
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Students"));
    assert!(body.contains("No records."));
}

// ---------------------------------------------------------------------------
// Test: POST /new persists and redirects to the list route
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_redirects_to_list_and_list_shows_record() {
    let app = app();
    let response = post_form(&app, "/new", "name=Ana&identity_number=X1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = body_string(get(&app, "/").await).await;
    assert!(body.contains("Ana"));
    assert!(body.contains("X1"));
    assert!(!body.contains("No records."));
}

// ---------------------------------------------------------------------------
// Test: invalid submission re-renders the form with field errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_missing_field_rerenders_form() {
    let app = app();
    let response = post_form(&app, "/new", "identity_number=X1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_string(response).await;
    assert!(body.contains("This field is required."));
    // The submitted value survives the re-render.
    assert!(body.contains("value=\"X1\""));

    // Nothing was persisted.
    let body = body_string(get(&app, "/").await).await;
    assert!(body.contains("No records."));
}

// ---------------------------------------------------------------------------
// Test: GET /new renders an empty form
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_form_renders() {
    let app = app();
    let response = get(&app, "/new").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("New Student"));
    assert!(body.contains("name=\"identity_number\""));
}

// ---------------------------------------------------------------------------
// Test: GET /view/:id renders the record; unknown and malformed ids fail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_shows_record() {
    let app = app();
    post_form(&app, "/new", "name=Ana&identity_number=X1").await;

    let response = get(&app, "/view/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Ana"));
    assert!(body.contains("Identity number"));
}

#[tokio::test]
async fn detail_unknown_id_returns_404() {
    let app = app();
    let response = get(&app, "/view/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detail_malformed_id_is_client_error() {
    let app = app();
    let response = get(&app, "/view/not-a-number").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: edit form prefills; POST overwrites and redirects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_form_prefills_current_values() {
    let app = app();
    post_form(&app, "/new", "name=Ana&identity_number=X1").await;

    let body = body_string(get(&app, "/edit/1").await).await;
    assert!(body.contains("Edit Student"));
    assert!(body.contains("value=\"Ana\""));
    assert!(body.contains("action=\"/edit/1\""));
}

#[tokio::test]
async fn edit_updates_record_and_redirects() {
    let app = app();
    post_form(&app, "/new", "name=Ana&identity_number=X1").await;

    let response = post_form(&app, "/edit/1", "name=Ana+B.&identity_number=X1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = body_string(get(&app, "/view/1").await).await;
    assert!(body.contains("Ana B."));
}

#[tokio::test]
async fn edit_unknown_id_returns_404() {
    let app = app();
    let response = post_form(&app, "/edit/42", "name=Ana&identity_number=X1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_with_invalid_submission_rerenders_form() {
    let app = app();
    post_form(&app, "/new", "name=Ana&identity_number=X1").await;

    let response = post_form(&app, "/edit/1", "name=&identity_number=X1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("This field is required."));

    // The record is untouched.
    let body = body_string(get(&app, "/view/1").await).await;
    assert!(body.contains("Ana"));
}

// ---------------------------------------------------------------------------
// Test: delete asks for confirmation on GET, removes on POST
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_confirms_then_removes() {
    let app = app();
    post_form(&app, "/new", "name=Ana&identity_number=X1").await;

    let response = get(&app, "/delete/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Are you sure"));
    assert!(body.contains("Ana"));

    let response = post_form(&app, "/delete/1", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert_eq!(get(&app, "/view/1").await.status(), StatusCode::NOT_FOUND);
    let body = body_string(get(&app, "/").await).await;
    assert!(body.contains("No records."));
}

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let app = app();
    assert_eq!(get(&app, "/delete/7").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(post_form(&app, "/delete/7", "").await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: unknown routes are 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = app();
    let response = get(&app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: the whole lifecycle over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_lifecycle_over_http() {
    let app = app();

    post_form(&app, "/new", "name=Ana&identity_number=X1").await;
    let body = body_string(get(&app, "/").await).await;
    assert!(body.contains("Ana"));

    post_form(&app, "/edit/1", "name=Ana+B.&identity_number=X1").await;
    let body = body_string(get(&app, "/view/1").await).await;
    assert!(body.contains("Ana B."));
    assert!(body.contains("X1"));

    post_form(&app, "/delete/1", "").await;
    assert_eq!(get(&app, "/view/1").await.status(), StatusCode::NOT_FOUND);
    let body = body_string(get(&app, "/").await).await;
    assert!(body.contains("No records."));
}
