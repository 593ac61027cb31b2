//! Prediction pipeline: resolve model → encode → predict → decode.

use anyhow::Context;
use tracing::debug;

use crate::errors::AppError;
use crate::inference::decoder::split_questions;
use crate::inference::features::FeatureVector;
use crate::models::predict::{
    ModelKind, ModelListResponse, ModelSummary, PredictRequest, PredictResponse,
};
use crate::state::AppState;

/// Runs one prediction request end to end.
pub async fn predict(
    state: &AppState,
    request: PredictRequest,
) -> Result<PredictResponse, AppError> {
    let model_id = request.model_id(&state.config.default_model_type).to_string();
    let model = state.models.get_or_load(&model_id).await?;

    let kind = ModelKind::from_model_id(&model_id);
    let features = FeatureVector::from_request(kind, &request);
    debug!("Predicting with {model_id}: {} tokens", features.token_count());

    let prediction = tokio::task::spawn_blocking(move || model.predict(&features))
        .await
        .context("prediction task failed")??;

    let text = state.decoder.decode(kind, &prediction)?;

    Ok(match kind {
        ModelKind::CoverLetter => PredictResponse::cover_letter(text),
        ModelKind::InterviewQuestions => PredictResponse::questions(split_questions(&text)),
    })
}

/// Lists artifacts on disk together with their cache state.
pub async fn list_models(state: &AppState) -> Result<ModelListResponse, AppError> {
    let available = state.models.available().await?;
    let loaded = state.models.loaded_ids().await;

    let models = available
        .into_iter()
        .map(|id| {
            let loaded = loaded.contains(&id);
            ModelSummary { id, loaded }
        })
        .collect();

    Ok(ModelListResponse {
        success: true,
        models,
    })
}
