//! Coffee fixture route
//!
//! The one concrete route in the skeleton. It is public and always fails
//! with the teapot error; it exists to demonstrate that the error mapping
//! produces the documented wire shape end to end, and as a stable target for
//! tests. The failure is a typed `Err`, not a panic — panics are reserved
//! for bugs, and the recovery layer would blur this fixture's point.

use axum::Json;

use crate::error::{ApiError, ErrorModel, Result};

/// Brew coffee
///
/// Always refused: this service is, and will remain, a teapot.
#[utoipa::path(
    get,
    path = "/api/v1/coffee",
    tag = "coffee",
    responses(
        (status = 418, description = "The service is a teapot", body = ErrorModel)
    )
)]
pub async fn brew_coffee() -> Result<Json<serde_json::Value>> {
    Err(ApiError::teapot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_brew_coffee_always_fails() {
        let result = brew_coffee().await;
        assert!(matches!(result, Err(ApiError::Teapot(_))));
    }
}
