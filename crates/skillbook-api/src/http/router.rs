//! Axum router configuration with middleware.
//!
//! Skill routes live under `/skills`; the collection answers both with and
//! without a trailing slash. Middleware: CORS (exposing the pagination
//! headers) and request tracing.

use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::response::PAGINATION_HEADERS;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(PAGINATION_HEADERS);

    let collection = get(handlers::skill::list_skills).post(handlers::skill::create_skill);

    let skill_routes = Router::new()
        .route("/skills", collection.clone())
        .route("/skills/", collection)
        .route(
            "/skills/id/{id}",
            get(handlers::skill::get_skill_by_id).delete(handlers::skill::delete_skill),
        )
        .route("/skills/id/{id}/name", patch(handlers::skill::rename_skill))
        .route("/skills/id/{id}/level", patch(handlers::skill::set_skill_level))
        .route("/skills/name/{name}", get(handlers::skill::get_skill_by_name));

    skill_routes
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
