//! Repository abstraction over the relational store
//!
//! Handlers and the model layer never touch the database engine directly;
//! they go through the traits in this module. The engine stays swappable and
//! the error surface stays structured ([`RepositoryError`]).

mod error;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use traits::{Repository, RepositoryResult, SoftDeleteRepository};
