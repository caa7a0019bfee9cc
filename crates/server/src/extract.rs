//! Request extractors that reject with storefront error bodies.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use store::DocumentId;
use storefront::{error_messages, ID_VALIDATION_ERROR};
use validator::Validate;

/// JSON body that has been deserialized and passed `validator` checks.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| ApiError::Validation(error_messages(&errors)))?;
        Ok(Self(value))
    }
}

/// Single path segment parsed as a document id.
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub DocumentId);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest(ID_VALIDATION_ERROR.to_string()))?;
        DocumentId::parse(&raw)
            .map(Self)
            .map_err(|_| ApiError::BadRequest(ID_VALIDATION_ERROR.to_string()))
    }
}
