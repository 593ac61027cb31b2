//! Axum route handlers for the inference API.

use axum::{extract::State, Json};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::inference::service;
use crate::models::predict::{ModelListResponse, PredictRequest, PredictResponse};
use crate::state::AppState;

/// POST /api/ai/predict
///
/// Runs the requested model (default `cover-letter`) over the resume summary and
/// job description. The body must be a JSON object.
/// 404 when no artifact exists for `type`, 500 on any other failure.
pub async fn handle_predict(
    State(state): State<AppState>,
    AppJson(body): AppJson<Map<String, Value>>,
) -> Result<Json<PredictResponse>, AppError> {
    let request = PredictRequest::from_object(body)
        .map_err(|e| AppError::MalformedRequest(e.to_string()))?;
    let response = service::predict(&state, request).await?;
    Ok(Json(response))
}

/// GET /api/ai/models
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelListResponse>, AppError> {
    Ok(Json(service::list_models(&state).await?))
}
