//! Repository trait definitions
//!
//! Generic CRUD traits using RPITIT (Return Position Impl Trait In Traits).
//!
//! - [`Repository`]: base trait for standard CRUD operations
//! - [`SoftDeleteRepository`]: extension for entities carrying the soft-delete
//!   capability; `delete` on such a repository marks rather than removes, and
//!   reads exclude marked rows unless asked otherwise
//!
//! # Example
//!
//! ```rust,ignore
//! use groundwork_service::repository::{Repository, RepositoryResult};
//!
//! struct CustomerRepository {
//!     pool: PgPool,
//! }
//!
//! impl Repository<i64, Customer, CreateCustomer, UpdateCustomer> for CustomerRepository {
//!     async fn find_by_id(&self, id: &i64) -> RepositoryResult<Option<Customer>> {
//!         sqlx::query_as("SELECT * FROM customers WHERE id = $1 AND is_deleted = FALSE")
//!             .bind(id)
//!             .fetch_optional(&self.pool)
//!             .await
//!             .map_err(Into::into)
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Base repository trait for CRUD operations
///
/// # Type Parameters
///
/// - `Id`: the identifier type for the entity (e.g., `i64`, `Uuid`)
/// - `Entity`: the full entity type returned from queries
/// - `Create`: the data transfer object for creating new entities
/// - `Update`: the data transfer object for updating existing entities
///
/// Implementations over soft-delete entities must apply the model's read
/// filter in every query here; callers of this trait never see marked rows.
pub trait Repository<Id, Entity, Create, Update>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// Returns `Ok(Some(entity))` if found, `Ok(None)` if not found.
    fn find_by_id(&self, id: &Id) -> impl Future<Output = RepositoryResult<Option<Entity>>> + Send;

    /// Find all entities
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Create a new entity
    ///
    /// Returns the created entity with any generated fields.
    fn create(&self, data: Create) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Update an existing entity
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` kind error if the entity doesn't exist.
    fn update(
        &self,
        id: &Id,
        data: Update,
    ) -> impl Future<Output = RepositoryResult<Entity>> + Send;

    /// Delete an entity by its identifier
    ///
    /// For soft-delete entities this marks the row; for others it removes it.
    /// Returns `true` if the entity was deleted, `false` if it didn't exist.
    /// A delete rejected by a restrict foreign key surfaces as a
    /// `ConstraintViolation` error, never as `Ok(false)`.
    fn delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}

/// Extension trait for entities with the soft-delete capability
///
/// Marked rows stay in the table; normal reads exclude them via the model's
/// read filter.
pub trait SoftDeleteRepository<Id, Entity, Create, Update>:
    Repository<Id, Entity, Create, Update>
{
    /// Mark an entity as deleted without removing it
    ///
    /// Returns `true` if the entity was marked, `false` if not found.
    fn soft_delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Restore a soft-deleted entity
    ///
    /// Returns `true` if the entity was restored, `false` if not found or not
    /// deleted.
    fn restore(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Find all entities including soft-deleted ones
    fn find_with_deleted(&self) -> impl Future<Output = RepositoryResult<Vec<Entity>>> + Send;

    /// Permanently remove an entity, bypassing the soft-delete mark
    ///
    /// Still subject to restrict foreign keys at the engine.
    fn force_delete(&self, id: &Id) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
