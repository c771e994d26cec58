//! Bearer token primitives

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Claims carried by an authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID or client ID)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Roles
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Claims {
    /// Check if the token carries a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Token validator abstraction
pub trait TokenValidator: Send + Sync + Clone {
    /// Validate a token and extract claims
    fn validate_token(&self, token: &str) -> Result<Claims, ApiError>;
}

/// Extract the token from the Authorization header (Bearer scheme)
pub fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    if let Some(token) = auth_header.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(ApiError::Unauthorized(
            "Invalid Authorization header format".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_token_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_token(&headers),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_extract_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(matches!(
            extract_token(&headers),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_claims_role_check() {
        let claims = Claims {
            sub: "user:1".to_string(),
            exp: 0,
            iat: None,
            iss: None,
            aud: None,
            roles: vec!["admin".to_string()],
        };
        assert!(claims.has_role("admin"));
        assert!(!claims.has_role("operator"));
    }
}
