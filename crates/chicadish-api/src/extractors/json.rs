//! `ValidatedJson` extractor: deserializes a JSON body and runs its validation rules.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use chicadish_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                    ApiError::from(AppError::validation(rejection.body_text()))
                }
                other => ApiError::rejected(other.status(), other.body_text()),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
