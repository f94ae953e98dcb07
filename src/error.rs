//! Error types for the review service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Message returned to clients when the review store cannot be reached.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Erro de conexão com o banco de dados";

/// Message returned to clients when a review payload is rejected.
pub const INVALID_REVIEW_MESSAGE: &str = "Dados inválidos";

/// Message returned to clients when the product id query parameter is absent.
pub const MISSING_PRODUCT_ID_MESSAGE: &str = "ID do produto é obrigatório";

// == Review Error Enum ==
/// Unified error type for the review service.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Client supplied missing or out-of-range data
    #[error("{0}")]
    InvalidInput(String),

    /// Review store unreachable or failing
    #[error("Erro de conexão com o banco de dados")]
    StoreUnavailable,
}

impl From<StoreError> for ReviewError {
    /// Driver detail stays in the logs; clients only see the generic message.
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Review store operation failed");
        ReviewError::StoreUnavailable
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReviewError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ReviewError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the review service.
pub type Result<T> = std::result::Result<T, ReviewError>;
