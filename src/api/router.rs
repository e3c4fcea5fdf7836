use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::entities;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Generic entity API
        .nest("/api", create_entity_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn create_entity_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{entity}",
            get(entities::list_records).post(entities::create_record),
        )
        .route(
            "/{entity}/{id}",
            put(entities::update_record).delete(entities::delete_record),
        )
}
