//! Service Module
//!
//! Request-independent business logic behind the HTTP handlers.

mod reviews;

pub use reviews::{
    ReviewDigest, ReviewService, MAX_SUMMARY_COMMENTS, NO_SUMMARY, SUMMARY_FAILED,
};
