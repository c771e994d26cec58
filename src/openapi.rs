//! OpenAPI document assembly
//!
//! The document is generated with utoipa and published, together with a
//! Swagger UI, only in development-like environments
//! ([`crate::config::Config::is_development`]). Because the default API
//! version is also mounted unversioned, every route would otherwise appear
//! twice; [`strip_unversioned_paths`] removes the unversioned duplicates
//! before publication.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorModel;
use crate::routes::profile::UpdateProfileRequest;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "groundwork-service",
        description = "Minimal web-API skeleton: versioned routing, bearer auth, \
                       soft-delete persistence conventions"
    ),
    paths(
        crate::routes::coffee::brew_coffee,
        crate::routes::profile::update_profile,
    ),
    components(schemas(ErrorModel, UpdateProfileRequest)),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by protected paths
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Remove unversioned path duplicates from the document
///
/// A path is versioned when one of its segments is `v` followed by digits
/// (e.g. `/api/v1/coffee`). Everything else is the compatibility alias and
/// is dropped from the published document.
pub fn strip_unversioned_paths(openapi: &mut utoipa::openapi::OpenApi) {
    openapi.paths.paths.retain(|path, _| is_versioned(path));
}

fn is_versioned(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment
            .strip_prefix('v')
            .map(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false)
    })
}

/// Swagger UI integration
pub struct SwaggerUI;

impl SwaggerUI {
    /// Create a Swagger UI router serving the given specification
    ///
    /// # Arguments
    ///
    /// * `path` - base path for the UI (e.g., "/swagger-ui")
    /// * `openapi` - the (already stripped) OpenAPI specification
    pub fn with_spec<S>(path: &'static str, openapi: utoipa::openapi::OpenApi) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        SwaggerUi::new(path)
            .url("/api-docs/openapi.json", openapi)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_versioned() {
        assert!(is_versioned("/api/v1/coffee"));
        assert!(is_versioned("/api/v12/coffee"));
        assert!(!is_versioned("/api/coffee"));
        assert!(!is_versioned("/api/vNext/coffee"));
        assert!(!is_versioned("/health"));
    }

    #[test]
    fn test_document_contains_only_versioned_paths() {
        let mut doc = ApiDoc::openapi();
        strip_unversioned_paths(&mut doc);
        assert!(!doc.paths.paths.is_empty());
        for path in doc.paths.paths.keys() {
            assert!(is_versioned(path), "unversioned path published: {}", path);
        }
    }

    #[test]
    fn test_document_includes_coffee_fixture() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/coffee"));
    }
}
