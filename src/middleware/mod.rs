//! HTTP middleware
//!
//! Bearer authentication is the only middleware this crate carries; layer
//! ordering (trace, timeout, panic recovery) lives in [`crate::server`].

mod bearer;
mod token;

pub use bearer::JwtAuth;
pub use token::{extract_token, Claims, TokenValidator};
