//! Domain model and request/response DTOs for the review API

pub mod requests;
pub mod responses;
pub mod review;

// Re-export commonly used types
pub use requests::{GetReviewsQuery, NewReview, SaveReviewRequest};
pub use responses::{
    CacheStatsResponse, ErrorResponse, GetReviewsResponse, HealthResponse, ReviewItem,
    SaveReviewResponse,
};
pub use review::{average_rating, Review};
