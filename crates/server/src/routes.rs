use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // HTML front end
        .route("/", get(handlers::index_page))
        .route("/recommendations", get(handlers::recommendations_page))
        // JSON API
        .route("/api/users", get(handlers::get_users))
        .route("/api/recommendations", post(handlers::api_recommendations))
        // Operational
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
