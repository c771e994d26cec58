//! # groundwork-service
//!
//! Minimal web-API project skeleton: versioned HTTP routing under an area
//! prefix, JWT bearer authentication, a total error-to-response mapping,
//! request validation wiring, and an entity convention layer that applies
//! soft-delete read filters and restrict-on-delete foreign keys to every
//! registered entity at model-build time.
//!
//! There is no business logic here. The one concrete route, `GET
//! /api/v1/coffee`, is public and always fails with HTTP 418 — it exists to
//! demonstrate the error mapping contract and as a test fixture.
//!
//! ## Example
//!
//! ```rust,no_run
//! use groundwork_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let model = ModelBuilder::new().build();
//!     let auth = JwtAuth::new(&config.jwt)?;
//!     let state = AppState::new(config.clone(), model, None);
//!
//!     let app = routes::app(&config, auth).with_state(state);
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod model;
pub mod observability;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;
pub mod versioning;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, JwtConfig, ServiceConfig};
    pub use crate::error::{ApiError, ErrorModel, Result};
    pub use crate::extract::{Validate, ValidatedJson};
    pub use crate::health::health;
    pub use crate::middleware::{extract_token, Claims, JwtAuth, TokenValidator};
    pub use crate::model::{
        ColumnDef, DeleteBehavior, Entity, ForeignKeyDef, Model, ModelBuilder, SoftDelete, Unique,
    };
    pub use crate::observability::init_tracing;
    pub use crate::openapi::{strip_unversioned_paths, ApiDoc, SwaggerUI};
    pub use crate::repository::{
        Repository, RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult,
        SoftDeleteRepository,
    };
    pub use crate::routes;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::versioning::{ApiVersion, VersionedApiBuilder};
}
