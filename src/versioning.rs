//! URL path versioning with an area prefix
//!
//! Routes are grouped as `/{area}/{version}/{resource}`, e.g.
//! `/api/v1/coffee`. The builder additionally mounts the default version's
//! routes directly under the area (`/api/coffee`) so unversioned callers keep
//! working; the OpenAPI document strips that duplicate
//! ([`crate::openapi::strip_unversioned_paths`]).
//!
//! ## Example
//!
//! ```rust,ignore
//! let api = VersionedApiBuilder::new()
//!     .add_version(ApiVersion::V1, |routes| {
//!         routes.route("/coffee", get(brew_coffee))
//!     })
//!     .build();
//! ```

use axum::Router;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ApiVersion {
    /// API Version 1
    #[default]
    V1,
    /// API Version 2
    V2,
    /// API Version 3
    V3,
}

impl ApiVersion {
    /// Parse a version from a string (e.g., "v1", "V1", "1")
    pub fn parse(s: &str) -> Option<Self> {
        let lowercase = s.to_lowercase();
        let normalized = lowercase.trim_start_matches('v');
        match normalized {
            "1" => Some(Self::V1),
            "2" => Some(Self::V2),
            "3" => Some(Self::V3),
            _ => None,
        }
    }

    /// The version number
    pub fn as_number(&self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }

    /// The version as a path segment (e.g., "v1")
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

impl From<ApiVersion> for u8 {
    fn from(version: ApiVersion) -> Self {
        version.as_number()
    }
}

/// Builder for the versioned API surface
///
/// Generic over the router's state so route modules can keep taking
/// `Router<AppState>`.
pub struct VersionedApiBuilder<S = ()> {
    versions: Vec<(ApiVersion, Router<S>)>,
    area: String,
    default_version: ApiVersion,
}

impl<S> Default for VersionedApiBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> VersionedApiBuilder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a builder with the standard `api` area and V1 as the default
    /// version
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            area: "api".to_string(),
            default_version: ApiVersion::default(),
        }
    }

    /// Override the area segment
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into().trim_matches('/').to_string();
        self
    }

    /// Set which version is also served unversioned
    pub fn with_default_version(mut self, version: ApiVersion) -> Self {
        self.default_version = version;
        self
    }

    /// Add an API version
    pub fn add_version<F>(mut self, version: ApiVersion, routes: F) -> Self
    where
        F: FnOnce(Router<S>) -> Router<S>,
    {
        let router = routes(Router::new());
        self.versions.push((version, router));
        self
    }

    /// Number of versions registered
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Whether a specific version has been added
    pub fn has_version(&self, version: ApiVersion) -> bool {
        self.versions.iter().any(|(v, _)| *v == version)
    }

    /// Build the router
    ///
    /// Each version lands at `/{area}/{version}`; the default version is
    /// also nested at `/{area}` as the unversioned alias.
    pub fn build(self) -> Router<S> {
        let mut router = Router::new();

        for (version, version_router) in self.versions {
            let versioned_path = format!("/{}/{}", self.area, version.as_path_segment());
            if version == self.default_version {
                router = router.nest(
                    &format!("/{}", self.area),
                    version_router.clone(),
                );
            }
            router = router.nest(&versioned_path, version_router);
        }

        router
    }
}
