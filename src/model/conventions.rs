//! Model building and blanket conventions
//!
//! [`ModelBuilder`] collects entity registrations during startup, then
//! `build()` produces an immutable [`Model`]. Build is where the two blanket
//! conventions are applied, once, to every registration:
//!
//! - soft-delete entities get the global read filter and, if their column set
//!   doesn't already carry them, the `is_deleted`/`deleted_at` columns;
//! - every foreign key comes out [`DeleteBehavior::Restrict`], whatever the
//!   entity declared.
//!
//! The model is shared behind an `Arc` and never mutated after build.

use std::sync::Arc;

use sqlx::PgPool;

use super::entity::{ColumnDef, DeleteBehavior, Entity, ForeignKeyDef};
use super::query::Select;
use crate::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

/// Read filter installed on every soft-delete entity
pub(crate) const SOFT_DELETE_FILTER: &str = "is_deleted = FALSE";

/// A registered entity after conventions have been applied
#[derive(Debug, Clone)]
pub struct EntityDef {
    /// Short type name, for diagnostics
    pub name: &'static str,
    /// Table name
    pub table: &'static str,
    /// Primary key column
    pub id_column: &'static str,
    /// Column set (soft-delete columns appended when applicable)
    pub columns: Vec<ColumnDef>,
    /// Foreign keys (always `Restrict` after build)
    pub foreign_keys: Vec<ForeignKeyDef>,
    /// Whether the soft-delete capability was detected at registration
    pub soft_delete: bool,
    /// Seed statements applied after schema creation
    pub seed: Vec<String>,
}

/// Collects entity registrations; consumed by [`ModelBuilder::build`]
#[derive(Debug, Default)]
pub struct ModelBuilder {
    entities: Vec<EntityDef>,
}

impl ModelBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type
    ///
    /// `soft_delete` comes from the capability probe at the registration
    /// site; use [`register_entities!`] rather than passing it by hand.
    /// Register entities in dependency order so emitted DDL creates
    /// referenced tables first.
    ///
    /// [`register_entities!`]: crate::register_entities
    #[must_use]
    pub fn entity<T: Entity>(mut self, soft_delete: bool) -> Self {
        self.entities.push(EntityDef {
            name: short_type_name::<T>(),
            table: T::TABLE,
            id_column: T::ID_COLUMN,
            columns: T::columns(),
            foreign_keys: T::foreign_keys(),
            soft_delete,
            seed: T::seed(),
        });
        self
    }

    /// Apply conventions and freeze the model
    pub fn build(self) -> Model {
        let entities = self
            .entities
            .into_iter()
            .map(|mut def| {
                // Blanket override, no opt-out.
                for fk in &mut def.foreign_keys {
                    if fk.on_delete != DeleteBehavior::Restrict {
                        tracing::debug!(
                            entity = def.name,
                            column = fk.column,
                            declared = fk.on_delete.as_sql(),
                            "Overriding declared delete behavior to RESTRICT"
                        );
                    }
                    fk.on_delete = DeleteBehavior::Restrict;
                }

                if def.soft_delete {
                    if !def.columns.iter().any(|c| c.name == "is_deleted") {
                        def.columns
                            .push(ColumnDef::new("is_deleted", "BOOLEAN NOT NULL DEFAULT FALSE"));
                    }
                    if !def.columns.iter().any(|c| c.name == "deleted_at") {
                        def.columns
                            .push(ColumnDef::nullable("deleted_at", "TIMESTAMPTZ"));
                    }
                }

                def
            })
            .collect::<Vec<_>>();

        tracing::info!(
            entities = entities.len(),
            soft_delete = entities.iter().filter(|e| e.soft_delete).count(),
            "Model built"
        );

        Model {
            entities: Arc::from(entities),
        }
    }
}

/// Immutable entity model
///
/// Cheap to clone; all clones share the same entity definitions.
#[derive(Debug, Clone)]
pub struct Model {
    entities: Arc<[EntityDef]>,
}

impl Model {
    /// All registered entities, in registration order
    pub fn entities(&self) -> &[EntityDef] {
        &self.entities
    }

    /// Look up an entity by table name
    pub fn entity(&self, table: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.table == table)
    }

    /// The read filter for a table, if its entity is soft-delete
    pub fn read_filter(&self, table: &str) -> Option<&'static str> {
        self.entity(table)
            .filter(|e| e.soft_delete)
            .map(|_| SOFT_DELETE_FILTER)
    }

    /// Start a select against a registered table
    ///
    /// The read filter is applied transparently; see [`Select::with_deleted`]
    /// for the escape hatch.
    pub fn select<'a>(&'a self, table: &'a str) -> Select<'a> {
        Select::new(self, table)
    }

    /// The statement that marks a row deleted, for soft-delete tables
    ///
    /// Returns `None` for tables without the capability; callers fall back to
    /// a hard `DELETE` there.
    pub fn soft_delete_stmt(&self, table: &str) -> Option<String> {
        self.entity(table).filter(|e| e.soft_delete).map(|e| {
            format!(
                "UPDATE {} SET is_deleted = TRUE, deleted_at = NOW() \
                 WHERE {} = $1 AND is_deleted = FALSE",
                e.table, e.id_column
            )
        })
    }

    /// CREATE TABLE statement for one entity
    ///
    /// Foreign keys are emitted as named constraints with `ON DELETE
    /// RESTRICT` so the engine enforces the policy.
    pub fn create_table_sql(&self, def: &EntityDef) -> String {
        let mut parts: Vec<String> = def
            .columns
            .iter()
            .map(|c| {
                if c.nullable {
                    format!("{} {}", c.name, c.sql_type)
                } else if c.sql_type.contains("NOT NULL") || c.name == def.id_column {
                    format!("{} {}", c.name, c.sql_type)
                } else {
                    format!("{} {} NOT NULL", c.name, c.sql_type)
                }
            })
            .collect();

        parts.push(format!("PRIMARY KEY ({})", def.id_column));

        for fk in &def.foreign_keys {
            parts.push(format!(
                "CONSTRAINT fk_{}_{} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                def.table,
                fk.column,
                fk.column,
                fk.references_table,
                fk.references_column,
                fk.on_delete.as_sql()
            ));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            def.table,
            parts.join(",\n    ")
        )
    }

    /// Full schema DDL, in registration order
    pub fn ddl(&self) -> Vec<String> {
        self.entities
            .iter()
            .map(|def| self.create_table_sql(def))
            .collect()
    }

    /// Create the schema and apply seed statements
    ///
    /// Idempotent at the table level (`CREATE TABLE IF NOT EXISTS`); seed
    /// statements are the entity's responsibility to make re-runnable.
    pub async fn ensure_created(&self, pool: &PgPool) -> RepositoryResult<()> {
        for def in self.entities.iter() {
            let sql = self.create_table_sql(def);
            sqlx::query(&sql).execute(pool).await.map_err(|e| {
                RepositoryError::from(e)
                    .with_operation(RepositoryOperation::Schema)
                    .with_entity(def.name, def.table)
            })?;
            tracing::debug!(table = def.table, "Table ensured");
        }

        for def in self.entities.iter() {
            for stmt in &def.seed {
                sqlx::query(stmt).execute(pool).await.map_err(|e| {
                    RepositoryError::from(e)
                        .with_operation(RepositoryOperation::Schema)
                        .with_entity(def.name, def.table)
                })?;
            }
            if !def.seed.is_empty() {
                tracing::info!(table = def.table, rows = def.seed.len(), "Seed applied");
            }
        }

        Ok(())
    }
}

/// Last path segment of a type name
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{SoftDelete, Unique};
    use crate::register_entities;
    use chrono::{DateTime, Utc};

    struct Customer {
        id: i64,
        is_deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl Entity for Customer {
        type Id = i64;
        const TABLE: &'static str = "customers";

        fn columns() -> Vec<ColumnDef> {
            vec![
                ColumnDef::new("id", "BIGSERIAL"),
                ColumnDef::new("display_name", "TEXT"),
            ]
        }

        fn seed() -> Vec<String> {
            vec![
                "INSERT INTO customers (display_name) SELECT 'First Customer' \
                 WHERE NOT EXISTS (SELECT 1 FROM customers)"
                    .to_string(),
            ]
        }
    }

    impl SoftDelete for Customer {
        fn is_deleted(&self) -> bool {
            self.is_deleted
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }
    }

    impl Unique for Customer {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }
    }

    struct Order;

    impl Entity for Order {
        type Id = i64;
        const TABLE: &'static str = "orders";

        fn columns() -> Vec<ColumnDef> {
            vec![
                ColumnDef::new("id", "BIGSERIAL"),
                ColumnDef::new("customer_id", "BIGINT"),
            ]
        }

        fn foreign_keys() -> Vec<ForeignKeyDef> {
            // Declared cascade on purpose; build must override it.
            vec![ForeignKeyDef::with_behavior(
                "customer_id",
                "customers",
                "id",
                DeleteBehavior::Cascade,
            )]
        }
    }

    fn model() -> Model {
        register_entities!(ModelBuilder::new(), [Customer, Order]).build()
    }

    #[test]
    fn test_capability_detected_per_type() {
        let model = model();
        assert!(model.entity("customers").map(|e| e.soft_delete) == Some(true));
        assert!(model.entity("orders").map(|e| e.soft_delete) == Some(false));
    }

    #[test]
    fn test_read_filter_only_on_soft_delete_entities() {
        let model = model();
        assert_eq!(model.read_filter("customers"), Some("is_deleted = FALSE"));
        assert_eq!(model.read_filter("orders"), None);
        assert_eq!(model.read_filter("unknown"), None);
    }

    #[test]
    fn test_every_foreign_key_is_restrict() {
        let model = model();
        for def in model.entities() {
            for fk in &def.foreign_keys {
                assert_eq!(
                    fk.on_delete,
                    DeleteBehavior::Restrict,
                    "{}.{} kept its declared behavior",
                    def.table,
                    fk.column
                );
            }
        }
    }

    #[test]
    fn test_soft_delete_columns_appended() {
        let model = model();
        let customers = model.entity("customers").unwrap();
        assert!(customers.columns.iter().any(|c| c.name == "is_deleted"));
        assert!(customers.columns.iter().any(|c| c.name == "deleted_at"));

        let orders = model.entity("orders").unwrap();
        assert!(!orders.columns.iter().any(|c| c.name == "is_deleted"));
    }

    #[test]
    fn test_ddl_emits_on_delete_restrict() {
        let model = model();
        let orders_sql = model.create_table_sql(model.entity("orders").unwrap());
        assert!(orders_sql.contains("ON DELETE RESTRICT"));
        assert!(!orders_sql.contains("CASCADE"));
        assert!(orders_sql.contains("CONSTRAINT fk_orders_customer_id"));
    }

    #[test]
    fn test_ddl_in_registration_order() {
        let model = model();
        let ddl = model.ddl();
        assert_eq!(ddl.len(), 2);
        assert!(ddl[0].contains("customers"));
        assert!(ddl[1].contains("orders"));
    }

    #[test]
    fn test_soft_delete_stmt() {
        let model = model();
        let stmt = model.soft_delete_stmt("customers").unwrap();
        assert!(stmt.contains("SET is_deleted = TRUE"));
        assert!(stmt.contains("deleted_at = NOW()"));
        assert!(stmt.contains("WHERE id = $1"));
        assert!(model.soft_delete_stmt("orders").is_none());
    }

    #[test]
    fn test_seed_recorded() {
        let model = model();
        let customers = model.entity("customers").unwrap();
        assert_eq!(customers.seed.len(), 1);
        assert!(customers.seed[0].contains("First Customer"));
    }

    #[test]
    fn test_model_is_cheap_to_clone() {
        let model = model();
        let clone = model.clone();
        assert_eq!(model.entities().len(), clone.entities().len());
    }

    #[test]
    fn test_empty_model() {
        let model = ModelBuilder::new().build();
        assert!(model.entities().is_empty());
        assert!(model.ddl().is_empty());
    }
}
