//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::Config, model::Model};

/// Application state shared across all handlers
///
/// Cheap to clone; everything lives behind one `Arc`. The config and model
/// are frozen at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    config: Config,
    model: Model,
    db: Option<PgPool>,
}

impl AppState {
    /// Assemble the state from startup products
    pub fn new(config: Config, model: Model, db: Option<PgPool>) -> Self {
        Self {
            inner: Arc::new(StateInner { config, model, db }),
        }
    }

    /// The startup configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The built entity model
    pub fn model(&self) -> &Model {
        &self.inner.model
    }

    /// The database pool, when one was configured
    pub fn db(&self) -> Option<&PgPool> {
        self.inner.db.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;

    #[test]
    fn test_state_clone_shares_inner() {
        let state = AppState::new(Config::default(), ModelBuilder::new().build(), None);
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
        assert!(clone.db().is_none());
        assert_eq!(clone.config().service.port, 8080);
    }
}
