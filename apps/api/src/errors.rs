use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::inference::cache::CacheError;
use crate::inference::decoder::DecodeError;
use crate::inference::model::ModelError;
use crate::models::predict::PredictResponse;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{ "success": false, "error": <message> }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Model {0} not found")]
    ModelNotFound(String),

    #[error("{0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound(model_id) => AppError::ModelNotFound(model_id),
            CacheError::Model(e) => AppError::Model(e),
            CacheError::Task(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ModelNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::ModelNotFound(model_id) => {
                tracing::warn!("Model {model_id} requested but no artifact exists");
            }
            AppError::MalformedRequest(msg) => tracing::warn!("Malformed request: {msg}"),
            AppError::Model(e) => tracing::error!("Model error: {e}"),
            AppError::Decode(e) => tracing::error!("Decode error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        (status, Json(PredictResponse::failure(self.to_string()))).into_response()
    }
}
