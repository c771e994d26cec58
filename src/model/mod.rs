//! Entity convention layer
//!
//! Entities declare their shape through the [`Entity`] trait and opt into
//! capabilities ([`SoftDelete`], [`Unique`]) by implementing capability
//! traits. The [`ModelBuilder`] collects registrations at startup and
//! `build()` applies two blanket conventions to the finished [`Model`]:
//!
//! - every soft-delete entity gets a global read filter `is_deleted = FALSE`;
//! - every declared foreign key is forced to [`DeleteBehavior::Restrict`],
//!   whatever behavior the entity declared.
//!
//! The built model is immutable and shared; query planning consults it
//! explicitly through [`Model::select`] and friends.

mod conventions;
mod entity;
mod query;

pub use conventions::{EntityDef, Model, ModelBuilder};
pub use entity::{
    ColumnDef, DeleteBehavior, Entity, ForeignKeyDef, ProbeDefault, SoftDelete, SoftDeleteProbe,
    Unique,
};
pub use query::Select;
