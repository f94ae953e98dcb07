//! Response DTOs for the review API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Review;

/// Message returned after a review is stored.
pub const REVIEW_SAVED_MESSAGE: &str = "Avaliação salva com sucesso";

/// Response body for POST /save_review
#[derive(Debug, Clone, Serialize)]
pub struct SaveReviewResponse {
    pub message: String,
}

impl SaveReviewResponse {
    pub fn saved() -> Self {
        Self {
            message: REVIEW_SAVED_MESSAGE.to_string(),
        }
    }
}

/// A review as listed by GET /get_reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub produto_id: String,
    pub nome_usuario: String,
    pub nota: u8,
    pub avaliacao: String,
}

impl From<Review> for ReviewItem {
    fn from(review: Review) -> Self {
        Self {
            produto_id: review.product_id,
            nome_usuario: review.reviewer_name,
            nota: review.rating,
            avaliacao: review.text,
        }
    }
}

/// Response body for GET /get_reviews
#[derive(Debug, Clone, Serialize)]
pub struct GetReviewsResponse {
    /// Generated summary, or the "no summary" sentinel
    pub resumo_avaliacao: String,
    /// Mean rating rounded to two decimals
    pub media: f64,
    /// Every review of the product, newest first
    pub avaliacoes: Vec<ReviewItem>,
    /// Present only when the summary could not be generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resumo_erro: Option<String>,
}

/// Summary cache counters as reported by GET /health
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" while the review store is unreachable
    pub status: String,
    /// "connected" or "unavailable"
    pub store: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub summary_cache: CacheStatsResponse,
}

impl HealthResponse {
    pub fn new(store_available: bool, stats: CacheStats) -> Self {
        let (status, store) = if store_available {
            ("healthy", "connected")
        } else {
            ("degraded", "unavailable")
        };

        Self {
            status: status.to_string(),
            store: store.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary_cache: stats.into(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
