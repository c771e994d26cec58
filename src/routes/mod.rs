//! Route assembly
//!
//! [`app`] builds the whole HTTP surface: the health endpoint, the versioned
//! API (bearer-protected except routes mounted public), and, in
//! development-like environments only, the OpenAPI document and Swagger UI.

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use utoipa::OpenApi as _;

use crate::config::Config;
use crate::health::health;
use crate::middleware::JwtAuth;
use crate::openapi::{strip_unversioned_paths, ApiDoc, SwaggerUI};
use crate::state::AppState;
use crate::versioning::{ApiVersion, VersionedApiBuilder};

pub mod coffee;
pub mod profile;

/// Assemble the application router
///
/// The coffee fixture is deliberately outside the auth layer; everything
/// else under the area requires a bearer token.
pub fn app(config: &Config, auth: JwtAuth) -> Router<AppState> {
    let api = VersionedApiBuilder::new()
        .add_version(ApiVersion::V1, move |routes| {
            let protected = Router::new()
                .route("/profile", put(profile::update_profile))
                .layer(middleware::from_fn_with_state(
                    auth.clone(),
                    JwtAuth::middleware,
                ));

            routes
                .route("/coffee", get(coffee::brew_coffee))
                .merge(protected)
        })
        .build();

    let mut router = Router::new().route("/health", get(health)).merge(api);

    if config.is_development() {
        let mut doc = ApiDoc::openapi();
        strip_unversioned_paths(&mut doc);
        router = router.merge(SwaggerUI::with_spec("/swagger-ui", doc));
        tracing::info!("Swagger UI mounted at /swagger-ui");
    }

    router
}
