//! API Routes
//!
//! Configures the Axum router with all review service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{get_reviews_handler, health_handler, save_review_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /save_review` - Store a review
/// - `GET /get_reviews?produto_id=<id>` - Reviews, average rating and summary
/// - `GET /health` - Store connectivity and summary cache counters
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/save_review", post(save_review_handler))
        .route("/get_reviews", get(get_reviews_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
