//! Request DTOs for the review API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::models::review::{MAX_RATING, MIN_RATING};

/// Request body for POST /save_review
///
/// Every field is optional at the parsing level so that a missing field is
/// reported as invalid input rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveReviewRequest {
    /// Product being reviewed
    pub produto_id: Option<String>,
    /// Reviewer name
    pub nome_usuario: Option<String>,
    /// Rating, 1 to 5
    pub nota: Option<i64>,
    /// Review text
    pub avaliacao: Option<String>,
}

/// A save request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: String,
    pub reviewer_name: String,
    pub rating: u8,
    pub text: String,
}

impl SaveReviewRequest {
    /// Checks that all four fields are present and non-empty and the rating
    /// is within range.
    pub fn validate(self) -> Option<NewReview> {
        let product_id = non_empty(self.produto_id)?;
        let reviewer_name = non_empty(self.nome_usuario)?;
        let text = non_empty(self.avaliacao)?;
        let rating = self
            .nota
            .filter(|n| (MIN_RATING..=MAX_RATING).contains(n))
            .and_then(|n| u8::try_from(n).ok())?;

        Some(NewReview {
            product_id,
            reviewer_name,
            rating,
            text,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Query string for GET /get_reviews
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetReviewsQuery {
    pub produto_id: Option<String>,
}

impl GetReviewsQuery {
    /// Returns the product id if one was supplied.
    pub fn product_id(&self) -> Option<&str> {
        self.produto_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}
