//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (prefix: `GROUNDWORK_`, sections separated by
//!    double underscore, e.g. `GROUNDWORK_SERVICE__LOG_LEVEL`)
//! 2. Current working directory: ./config.toml
//! 3. Default values
//!
//! The configuration is built once at process start and treated as immutable,
//! read-only state for the lifetime of the process.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// JWT bearer authentication configuration
    pub jwt: JwtConfig,

    /// Database configuration (optional; the skeleton runs without a store)
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Path to the verification key (PEM public key, or raw secret for HS*)
    pub public_key_path: PathBuf,

    /// JWT algorithm (RS256, ES256, HS256, ...)
    #[serde(default = "default_jwt_algorithm")]
    pub algorithm: String,

    /// JWT issuer to validate
    #[serde(default)]
    pub issuer: Option<String>,

    /// JWT audience to validate
    #[serde(default)]
    pub audience: Option<String>,
}

/// Database configuration
///
/// `url` also deserializes from `default_connection`, matching the
/// conventional connection-string name used by deployment tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(alias = "default_connection")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Maximum retry attempts for establishing the connection
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Run schema creation (DDL + seed data) at startup
    #[serde(default = "default_false")]
    pub ensure_created: bool,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_jwt_algorithm() -> String {
    "RS256".to_string()
}

fn default_max_connections() -> u32 {
    50
}

fn default_min_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    2
}

fn default_false() -> bool {
    false
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Reads `./config.toml` if present; environment variables with the
    /// `GROUNDWORK_` prefix override file-based values. The section separator
    /// is a double underscore so multi-word keys stay addressable:
    /// `GROUNDWORK_SERVICE__TIMEOUT_SECS` maps to `service.timeout_secs`.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file
    ///
    /// Useful for testing or non-standard deployments.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Load from config file (if exists)
            .merge(Toml::file(path))
            // Override with environment variables
            .merge(Env::prefixed("GROUNDWORK_").split("__"))
            .extract()?;

        Ok(config)
    }

    /// Whether this is a development-like environment
    ///
    /// Controls whether the OpenAPI document and Swagger UI are published.
    pub fn is_development(&self) -> bool {
        matches!(
            self.service.environment.as_str(),
            "development" | "dev" | "local"
        )
    }

    /// Get the database URL, if a database is configured
    pub fn database_url(&self) -> Option<&str> {
        self.database.as_ref().map(|db| db.url.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "groundwork-service".to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            jwt: JwtConfig {
                public_key_path: PathBuf::from("./keys/jwt-public.pem"),
                algorithm: default_jwt_algorithm(),
                issuer: None,
                audience: None,
            },
            database: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert!(config.database.is_none());
        assert!(config.is_development());
    }

    #[test]
    fn test_database_url_helper() {
        let mut config = Config::default();
        assert!(config.database_url().is_none());

        config.database = Some(DatabaseConfig {
            url: "postgres://localhost/app".to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            ensure_created: false,
        });
        assert_eq!(config.database_url(), Some("postgres://localhost/app"));
    }

    #[test]
    fn test_default_connection_alias() {
        // Deployment tooling hands the connection string over under the
        // conventional `default_connection` key.
        let db: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "default_connection": "postgres://user@host/db"
        }))
        .expect("alias should deserialize");
        assert_eq!(db.url, "postgres://user@host/db");
    }

    #[test]
    fn test_env_override_reaches_multi_word_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GROUNDWORK_SERVICE__LOG_LEVEL", "debug");
            jail.set_env("GROUNDWORK_SERVICE__TIMEOUT_SECS", "7");
            jail.set_env("GROUNDWORK_SERVICE__PORT", "9999");

            let config = Config::load_from("missing.toml").expect("load");
            assert_eq!(config.service.log_level, "debug");
            assert_eq!(config.service.timeout_secs, 7);
            assert_eq!(config.service.port, 9999);
            Ok(())
        });
    }

    #[test]
    fn test_environment_detection() {
        let mut config = Config::default();
        config.service.environment = "production".to_string();
        assert!(!config.is_development());

        config.service.environment = "local".to_string();
        assert!(config.is_development());
    }
}
