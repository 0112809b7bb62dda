use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::career::documents::DocumentError;
use crate::career::ingest::CvParseError;
use crate::career::memory::MemoryError;
use crate::career::ranker::RankError;
use crate::glucose::GlucoseError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    CvParse(#[from] CvParseError),

    #[error(transparent)]
    Glucose(#[from] GlucoseError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::CvParse(e) => {
                let code = match e {
                    CvParseError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
                    CvParseError::EmptyFile(_) | CvParseError::Unreadable { .. } => "PARSE_ERROR",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, e.to_string())
            }
            AppError::Glucose(e) => {
                let code = match e {
                    GlucoseError::MalformedRow { .. } => "MALFORMED_ROW",
                    GlucoseError::DuplicateTimestamp { .. } => "DUPLICATE_TIMESTAMP",
                    GlucoseError::MissingColumn(_) | GlucoseError::Empty | GlucoseError::Csv(_) => {
                        "INVALID_CSV"
                    }
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, e.to_string())
            }
            AppError::Document(e) => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_INPUT", e.to_string()),
            AppError::Rank(e) => {
                tracing::error!("Ranking error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RANKING_ERROR",
                    "Job ranking failed".to_string(),
                )
            }
            AppError::Memory(e) => {
                tracing::error!("Memory store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
