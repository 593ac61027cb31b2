pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::inference::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Inference API
        .route("/api/ai/predict", post(handlers::handle_predict))
        .route("/api/ai/models", get(handlers::handle_list_models))
        .with_state(state)
}
