//! Review domain model
//!
//! The persisted shape of a review. Field names on the wire and in the store
//! are the service's public Portuguese names.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// A stored product review.
///
/// Reviews are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Product the review belongs to
    #[serde(rename = "produto_id")]
    pub product_id: String,
    /// Name of the reviewer
    #[serde(rename = "nome_usuario")]
    pub reviewer_name: String,
    /// Rating in `MIN_RATING..=MAX_RATING`
    #[serde(rename = "nota")]
    pub rating: u8,
    /// Free-form review text
    #[serde(rename = "avaliacao")]
    pub text: String,
    /// Save time in Unix milliseconds; the newest-first sort key.
    /// Documents written without a timestamp read back as 0.
    #[serde(rename = "data", default)]
    pub created_at: i64,
}

impl Review {
    /// Creates a review stamped with the current time.
    pub fn new(
        product_id: impl Into<String>,
        reviewer_name: impl Into<String>,
        rating: u8,
        text: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            reviewer_name: reviewer_name.into(),
            rating,
            text: text.into(),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Overrides the save timestamp.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Mean rating rounded to two decimals, or 0 for no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    let mean = total as f64 / reviews.len() as f64;
    (mean * 100.0).round() / 100.0
}
