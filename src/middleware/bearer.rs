//! JWT bearer authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::{fs, sync::Arc};

use super::token::{extract_token, Claims, TokenValidator};
use crate::{config::JwtConfig, error::ApiError};

/// JWT authentication middleware state
#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl JwtAuth {
    /// Create the middleware state from configuration
    ///
    /// Reads the verification key at startup; a missing or malformed key is a
    /// configuration error, not a per-request one.
    pub fn new(config: &JwtConfig) -> Result<Self, ApiError> {
        let key_material = fs::read(&config.public_key_path).map_err(|e| {
            ApiError::Config(Box::new(figment::Error::from(format!(
                "Failed to read JWT key from '{}': {}",
                config.public_key_path.display(),
                e
            ))))
        })?;

        let algorithm = match config.algorithm.to_uppercase().as_str() {
            "RS256" => Algorithm::RS256,
            "RS384" => Algorithm::RS384,
            "RS512" => Algorithm::RS512,
            "ES256" => Algorithm::ES256,
            "ES384" => Algorithm::ES384,
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            alg => {
                return Err(ApiError::Config(Box::new(figment::Error::from(format!(
                    "Unsupported JWT algorithm: {}",
                    alg
                )))))
            }
        };

        let decoding_key = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
                DecodingKey::from_rsa_pem(&key_material)?
            }
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&key_material)?,
            // HS* takes the raw secret
            _ => DecodingKey::from_secret(&key_material),
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        }

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Middleware function: validate the bearer token and inject claims
    ///
    /// `/health` is always skipped. Public routes are mounted outside this
    /// layer rather than special-cased here.
    pub async fn middleware(
        State(auth): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, ApiError> {
        if request.uri().path() == "/health" {
            return Ok(next.run(request).await);
        }

        let token = extract_token(request.headers())?;
        let claims = auth.validate_token(&token)?;

        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}

impl TokenValidator for JwtAuth {
    fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}
