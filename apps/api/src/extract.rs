use axum::extract::FromRequest;

use crate::errors::AppError;

/// JSON body extractor whose rejection renders as an `AppError` failure payload
/// instead of Axum's plain-text response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
