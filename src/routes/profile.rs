//! Profile update route
//!
//! Protected fixture exercising the validation path: every failed field is
//! reported, in declaration order, joined by a comma in the 400 body.

use axum::http::StatusCode;

use crate::error::{ErrorModel, Result};
use crate::extract::{Validate, ValidatedJson};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile update payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// Profile identifier, must be positive
    pub id: i64,

    /// Display name, required
    pub display_name: String,

    /// Contact email
    pub email: String,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.id < 1 {
            errors.push("Must provide a valid ID.".to_string());
        }
        if self.display_name.trim().is_empty() {
            errors.push("Display name is required.".to_string());
        }
        if !self.email.contains('@') {
            errors.push("Email must be a valid address.".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Update the caller's profile
///
/// Requires a bearer token. The skeleton stores nothing; a valid payload is
/// simply acknowledged.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 204, description = "Profile accepted"),
        (status = 400, description = "Validation failed", body = ErrorModel),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorModel)
    ),
    security(("bearer" = []))
)]
pub async fn update_profile(
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<StatusCode> {
    tracing::debug!(id = request.id, "Profile update accepted");
    Ok(StatusCode::NO_CONTENT)
}
