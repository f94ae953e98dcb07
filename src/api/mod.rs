//! API Module
//!
//! HTTP handlers and routing for the review service REST API.
//!
//! # Endpoints
//! - `POST /save_review` - Store a review
//! - `GET /get_reviews?produto_id=<id>` - Reviews with average rating and summary
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
