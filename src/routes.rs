//! Route construction: the five CRUD routes derived from the entity
//! descriptor, plus health and version.

use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;

/// The fixed five-route mapping: list, detail, new, edit, delete. The POST
/// halves of new/edit/delete are the form submissions.
pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list))
        .route("/view/:id", get(handlers::detail))
        .route("/new", get(handlers::new_form).post(handlers::create))
        .route("/edit/:id", get(handlers::edit_form).post(handlers::edit))
        .route(
            "/delete/:id",
            get(handlers::delete_confirm).post(handlers::delete),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// Full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new().merge(common_routes()).merge(entity_routes(state))
}
