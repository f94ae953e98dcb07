//! API Handlers
//!
//! HTTP request handlers for each review service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::SummaryCache;
use crate::config::{Config, StoreBackend};
use crate::error::{ReviewError, Result, INVALID_REVIEW_MESSAGE};
use crate::models::{
    GetReviewsQuery, GetReviewsResponse, HealthResponse, SaveReviewRequest, SaveReviewResponse,
};
use crate::service::ReviewService;
use crate::store::{InMemoryReviewStore, MongoReviewStore, ReviewStore};
use crate::summarizer::GeminiSummarizer;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ReviewService,
}

impl AppState {
    pub fn new(service: ReviewService) -> Self {
        Self { service }
    }

    /// Wires the store, summary cache and summarizer from configuration.
    ///
    /// An unreachable store does not abort startup: the state is built
    /// without one and store-backed endpoints answer 500 for the lifetime of
    /// the process.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let summarizer = GeminiSummarizer::new(
            &config.gemini_api_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
            Duration::from_secs(config.summarizer_timeout),
        )?;

        let store: Option<Arc<dyn ReviewStore>> = match config.store_backend {
            StoreBackend::Memory => Some(Arc::new(InMemoryReviewStore::new()) as Arc<dyn ReviewStore>),
            StoreBackend::Mongo => match MongoReviewStore::connect(
                &config.mongo_uri,
                &config.database_name,
                &config.collection_name,
                Duration::from_secs(config.store_connect_timeout),
            )
            .await
            {
                Ok(store) => Some(Arc::new(store) as Arc<dyn ReviewStore>),
                Err(err) => {
                    warn!(error = %err, "Review store unavailable, running in degraded mode");
                    None
                }
            },
        };

        let cache = SummaryCache::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl),
        );

        Ok(Self::new(ReviewService::new(
            store,
            Arc::new(RwLock::new(cache)),
            Arc::new(summarizer),
        )))
    }
}

/// Handler for POST /save_review
///
/// A body that is not valid JSON, or has wrongly typed fields, is reported
/// the same way as missing fields.
pub async fn save_review_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveReviewResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected review body");
        ReviewError::InvalidInput(INVALID_REVIEW_MESSAGE.to_string())
    })?;

    state.service.save_review(request).await?;

    Ok((StatusCode::CREATED, Json(SaveReviewResponse::saved())))
}

/// Handler for GET /get_reviews?produto_id=<id>
pub async fn get_reviews_handler(
    State(state): State<AppState>,
    query: Option<Query<GetReviewsQuery>>,
) -> Result<Json<GetReviewsResponse>> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let digest = state.service.fetch_reviews(query.product_id()).await?;

    Ok(Json(GetReviewsResponse {
        resumo_avaliacao: digest.summary,
        media: digest.average_rating,
        avaliacoes: digest.reviews.into_iter().map(Into::into).collect(),
        resumo_erro: digest.summary_error,
    }))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.service.cache_stats().await;
    Json(HealthResponse::new(state.service.store_available(), stats))
}
