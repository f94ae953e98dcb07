//! Review Service
//!
//! Saves reviews and answers review listings with an average rating and a
//! cached summary.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, SummaryCache};
use crate::error::{ReviewError, Result, INVALID_REVIEW_MESSAGE, MISSING_PRODUCT_ID_MESSAGE};
use crate::models::{average_rating, Review, SaveReviewRequest};
use crate::store::ReviewStore;
use crate::summarizer::Summarizer;

/// Number of most recent reviews sent to the summarizer.
pub const MAX_SUMMARY_COMMENTS: usize = 20;

/// Summary reported when none can be produced.
pub const NO_SUMMARY: &str = "Nenhum resumo disponível.";

/// Reported alongside [`NO_SUMMARY`] when the summarizer call failed.
pub const SUMMARY_FAILED: &str = "Não foi possível gerar o resumo das avaliações";

/// Reviews of one product with their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDigest {
    pub summary: String,
    pub average_rating: f64,
    /// All reviews, newest first
    pub reviews: Vec<Review>,
    /// Set when the summarizer failed and `summary` is the sentinel
    pub summary_error: Option<String>,
}

impl ReviewDigest {
    fn empty() -> Self {
        Self {
            summary: NO_SUMMARY.to_string(),
            average_rating: 0.0,
            reviews: Vec::new(),
            summary_error: None,
        }
    }
}

/// Orchestrates the review store, summary cache and summarizer.
///
/// `store` is `None` when the store was unreachable at startup; every
/// operation then fails with [`ReviewError::StoreUnavailable`].
#[derive(Clone)]
pub struct ReviewService {
    store: Option<Arc<dyn ReviewStore>>,
    cache: Arc<RwLock<SummaryCache>>,
    summarizer: Arc<dyn Summarizer>,
}

impl ReviewService {
    pub fn new(
        store: Option<Arc<dyn ReviewStore>>,
        cache: Arc<RwLock<SummaryCache>>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            store,
            cache,
            summarizer,
        }
    }

    pub fn store_available(&self) -> bool {
        self.store.is_some()
    }

    /// Shared handle to the summary cache.
    pub fn cache(&self) -> Arc<RwLock<SummaryCache>> {
        Arc::clone(&self.cache)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    fn store(&self) -> Result<&Arc<dyn ReviewStore>> {
        self.store.as_ref().ok_or(ReviewError::StoreUnavailable)
    }

    // == Save Review ==
    /// Validates and stores a review.
    ///
    /// Invalid input is rejected before the store is touched.
    pub async fn save_review(&self, request: SaveReviewRequest) -> Result<()> {
        let new_review = request
            .validate()
            .ok_or_else(|| ReviewError::InvalidInput(INVALID_REVIEW_MESSAGE.to_string()))?;
        let store = self.store()?;

        let review = Review::new(
            new_review.product_id,
            new_review.reviewer_name,
            new_review.rating,
            new_review.text,
        );
        info!(product_id = %review.product_id, rating = review.rating, "Saving review");
        store.insert(review).await?;
        Ok(())
    }

    // == Fetch Reviews With Summary ==
    /// Lists a product's reviews with their average rating and summary.
    ///
    /// The summary comes from the cache when present. Otherwise the newest
    /// [`MAX_SUMMARY_COMMENTS`] review texts are summarized and the result is
    /// cached. A cached summary is not refreshed when new reviews arrive
    /// before it expires.
    pub async fn fetch_reviews(&self, product_id: Option<&str>) -> Result<ReviewDigest> {
        let product_id = product_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ReviewError::InvalidInput(MISSING_PRODUCT_ID_MESSAGE.to_string()))?;
        let store = self.store()?;

        let reviews = store.find_by_product(product_id).await?;
        if reviews.is_empty() {
            debug!(product_id, "No reviews found");
            return Ok(ReviewDigest::empty());
        }

        let average = average_rating(&reviews);
        let (summary, summary_error) = match self.resolve_summary(product_id, &reviews).await {
            Ok(summary) => (summary, None),
            Err(err) => {
                warn!(product_id, error = %err, "Summary generation failed");
                (NO_SUMMARY.to_string(), Some(SUMMARY_FAILED.to_string()))
            }
        };

        Ok(ReviewDigest {
            summary,
            average_rating: average,
            reviews,
            summary_error,
        })
    }

    /// Returns the cached summary or computes and caches a new one.
    ///
    /// The cache lock is released during the summarizer call, so concurrent
    /// misses for one product may each call the summarizer; the last write wins.
    async fn resolve_summary(
        &self,
        product_id: &str,
        reviews: &[Review],
    ) -> std::result::Result<String, crate::summarizer::SummarizerError> {
        if let Some(summary) = self.cache.write().await.get(product_id) {
            debug!(product_id, "Summary cache hit");
            return Ok(summary);
        }

        let comments: Vec<String> = reviews
            .iter()
            .take(MAX_SUMMARY_COMMENTS)
            .map(|review| review.text.clone())
            .collect();

        info!(product_id, comments = comments.len(), "Summary cache miss, summarizing");
        let summary = self.summarizer.summarize(&comments).await?;

        self.cache.write().await.put(product_id, summary.clone());
        Ok(summary)
    }
}
