//! Entity and capability traits
//!
//! [`Entity`] describes an entity's relational shape. Capabilities are
//! separate traits: implementing [`SoftDelete`] is the only way an entity
//! opts into soft deletion — detection is trait-based, never keyed off field
//! or type names.

use chrono::{DateTime, Utc};
use std::marker::PhantomData;

/// A single column in an entity's table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name
    pub name: &'static str,
    /// SQL type (e.g. "BIGINT", "TEXT", "TIMESTAMPTZ")
    pub sql_type: &'static str,
    /// Whether the column accepts NULL
    pub nullable: bool,
}

impl ColumnDef {
    /// A NOT NULL column
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
        }
    }

    /// A nullable column
    pub const fn nullable(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
        }
    }
}

/// What the engine does to dependents when a referenced row is deleted
///
/// Entities may declare any behavior; model build overrides every one of
/// them to `Restrict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteBehavior {
    /// Delete dependent rows
    Cascade,
    /// Null out the referencing column
    SetNull,
    /// Leave dependents alone, defer to constraints
    NoAction,
    /// Reject the delete while dependents exist
    #[default]
    Restrict,
}

impl DeleteBehavior {
    /// The SQL referential action clause
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// A declared foreign key relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyDef {
    /// Referencing column on this entity's table
    pub column: &'static str,
    /// Referenced table
    pub references_table: &'static str,
    /// Referenced column
    pub references_column: &'static str,
    /// Declared delete behavior (overridden to Restrict at model build)
    pub on_delete: DeleteBehavior,
}

impl ForeignKeyDef {
    /// Declare a foreign key with the default behavior
    pub const fn new(
        column: &'static str,
        references_table: &'static str,
        references_column: &'static str,
    ) -> Self {
        Self {
            column,
            references_table,
            references_column,
            on_delete: DeleteBehavior::Restrict,
        }
    }

    /// Declare a foreign key with an explicit behavior
    ///
    /// The declared behavior is recorded but does not survive model build.
    pub const fn with_behavior(
        column: &'static str,
        references_table: &'static str,
        references_column: &'static str,
        on_delete: DeleteBehavior,
    ) -> Self {
        Self {
            column,
            references_table,
            references_column,
            on_delete,
        }
    }
}

/// Relational shape of an entity type
pub trait Entity {
    /// Primary key type
    type Id;

    /// Table name
    const TABLE: &'static str;

    /// Primary key column name
    const ID_COLUMN: &'static str = "id";

    /// Column set, in declaration order
    fn columns() -> Vec<ColumnDef>;

    /// Declared foreign keys
    fn foreign_keys() -> Vec<ForeignKeyDef> {
        Vec::new()
    }

    /// Seed statements applied after schema creation
    fn seed() -> Vec<String> {
        Vec::new()
    }
}

/// Capability: the entity is soft-deleted rather than removed
///
/// Implementing this trait is what opts an entity into the global read
/// filter; the builder never inspects names.
pub trait SoftDelete {
    /// Whether this row is marked deleted
    fn is_deleted(&self) -> bool;

    /// When the row was marked, if ever
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
}

/// Capability: the entity has a comparable identity
pub trait Unique {
    /// Identifier type
    type Id: PartialEq;

    /// This entity's identifier
    fn id(&self) -> Self::Id;
}

/// Compile-time probe for the [`SoftDelete`] capability
///
/// At a registration site the entity type is concrete, so method resolution
/// can answer "does `T` implement `SoftDelete`?": the inherent by-value
/// `detect` below exists only when it does, and otherwise resolution falls
/// through to [`ProbeDefault::detect`]. Used by [`register_entities!`];
/// there is no runtime reflection involved.
///
/// [`register_entities!`]: crate::register_entities
pub struct SoftDeleteProbe<T>(PhantomData<T>);

impl<T> SoftDeleteProbe<T> {
    /// Create a probe for `T`
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SoftDeleteProbe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SoftDelete> SoftDeleteProbe<T> {
    /// Resolved when `T: SoftDelete`
    pub fn detect(self) -> bool {
        true
    }
}

/// Fallback for [`SoftDeleteProbe::detect`] when the capability is absent
pub trait ProbeDefault {
    /// Resolved only when no inherent `detect` applies
    fn detect(&self) -> bool {
        false
    }
}

impl<T> ProbeDefault for SoftDeleteProbe<T> {}

/// Register entity types on a [`ModelBuilder`], detecting the soft-delete
/// capability per type
///
/// ```rust,ignore
/// let model = register_entities!(ModelBuilder::new(), [Customer, Order]).build();
/// ```
///
/// [`ModelBuilder`]: crate::model::ModelBuilder
#[macro_export]
macro_rules! register_entities {
    ($builder:expr, [ $($ty:ty),* $(,)? ]) => {{
        let mut builder = $builder;
        $(
            let soft_delete = {
                #[allow(unused_imports)]
                use $crate::model::ProbeDefault as _;
                $crate::model::SoftDeleteProbe::<$ty>::new().detect()
            };
            builder = builder.entity::<$ty>(soft_delete);
        )*
        builder
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    struct Marked {
        deleted: bool,
        at: Option<DateTime<Utc>>,
    }

    impl SoftDelete for Marked {
        fn is_deleted(&self) -> bool {
            self.deleted
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.at
        }
    }

    #[test]
    fn test_probe_detects_capability() {
        use super::ProbeDefault as _;
        assert!(SoftDeleteProbe::<Marked>::new().detect());
        assert!(!SoftDeleteProbe::<Plain>::new().detect());
    }

    #[test]
    fn test_delete_behavior_sql() {
        assert_eq!(DeleteBehavior::Restrict.as_sql(), "RESTRICT");
        assert_eq!(DeleteBehavior::Cascade.as_sql(), "CASCADE");
        assert_eq!(DeleteBehavior::SetNull.as_sql(), "SET NULL");
        assert_eq!(DeleteBehavior::NoAction.as_sql(), "NO ACTION");
    }

    #[test]
    fn test_default_behavior_is_restrict() {
        assert_eq!(DeleteBehavior::default(), DeleteBehavior::Restrict);
        let fk = ForeignKeyDef::new("customer_id", "customers", "id");
        assert_eq!(fk.on_delete, DeleteBehavior::Restrict);
    }

    #[test]
    fn test_column_def_constructors() {
        let col = ColumnDef::new("id", "BIGINT");
        assert!(!col.nullable);
        let col = ColumnDef::nullable("deleted_at", "TIMESTAMPTZ");
        assert!(col.nullable);
    }
}
