//! Select building against the model
//!
//! The builder consults the model for the table's read filter, so callers get
//! soft-delete exclusion without asking for it. `with_deleted()` is the one
//! explicit escape hatch.

use super::conventions::Model;

/// A select statement under construction
#[derive(Debug)]
pub struct Select<'a> {
    model: &'a Model,
    table: &'a str,
    columns: Vec<String>,
    predicates: Vec<String>,
    include_deleted: bool,
}

impl<'a> Select<'a> {
    pub(crate) fn new(model: &'a Model, table: &'a str) -> Self {
        Self {
            model,
            table,
            columns: Vec::new(),
            predicates: Vec::new(),
            include_deleted: false,
        }
    }

    /// Select specific columns instead of `*`
    #[must_use]
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a predicate; predicates are ANDed in the order given
    #[must_use]
    pub fn filter(mut self, predicate: impl Into<String>) -> Self {
        self.predicates.push(predicate.into());
        self
    }

    /// Include soft-deleted rows
    ///
    /// Skips the model's read filter for this one statement. Has no effect on
    /// tables without the capability.
    #[must_use]
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Render the statement
    pub fn sql(&self) -> String {
        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut predicates: Vec<&str> = Vec::new();
        let read_filter = if self.include_deleted {
            None
        } else {
            self.model.read_filter(self.table)
        };
        if let Some(filter) = read_filter {
            predicates.push(filter);
        }
        for p in &self.predicates {
            predicates.push(p);
        }

        if predicates.is_empty() {
            format!("SELECT {} FROM {}", columns, self.table)
        } else {
            format!(
                "SELECT {} FROM {} WHERE {}",
                columns,
                self.table,
                predicates.join(" AND ")
            )
        }
    }
}
