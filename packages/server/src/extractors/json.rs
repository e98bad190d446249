use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Json extractor whose rejection is this API's standard error body. A
/// malformed or missing payload comes back as a VALIDATION_ERROR instead of
/// axum's plain-text default, so scanner clients and the web frontend can
/// parse every failure the same way.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;
        Ok(AppJson(value))
    }
}
