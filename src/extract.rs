//! Request extraction and validation
//!
//! [`ValidatedJson`] deserializes a JSON body and runs the payload's
//! [`Validate`] implementation before the handler ever sees it. Validation
//! collects every failed field, in field declaration order; the resulting
//! [`ApiError::Validation`] maps to 400 with the messages joined by a comma.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A payload that can check itself after deserialization
///
/// Implementations evaluate fields in declaration order and return every
/// failure, not just the first.
pub trait Validate {
    /// Ok, or one message per failed field
    fn validate(&self) -> Result<(), Vec<String>>;
}

/// JSON extractor that validates the payload
///
/// ```rust,ignore
/// async fn update_profile(
///     ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
/// ) -> Result<StatusCode> {
///     // request is structurally valid here
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate().map_err(ApiError::Validation)?;

        Ok(ValidatedJson(value))
    }
}
