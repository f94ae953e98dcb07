//! Review Store Module
//!
//! Persistence seam for reviews. The service only needs insert and a
//! per-product, newest-first read.

mod memory;
mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Review;

pub use memory::InMemoryReviewStore;
pub use mongo::MongoReviewStore;

// == Store Error ==
/// Failures reported by a review store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached within the connect timeout
    #[error("review store unreachable: {0}")]
    Unreachable(String),

    /// The backend rejected or failed an operation
    #[error("review store error: {0}")]
    Backend(String),
}

// == Review Store ==
/// A persistent collection of reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Inserts a review verbatim.
    async fn insert(&self, review: Review) -> Result<(), StoreError>;

    /// Returns every review for `product_id`, newest first.
    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Review>, StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
