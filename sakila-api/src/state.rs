//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::store::Catalog;

/// Application state shared across handlers
///
/// Generic over the [`Catalog`] backing the repositories so the router can
/// run against Postgres in production and an in-memory catalog in tests.
#[derive(Clone)]
pub struct AppState<C> {
    config: Arc<Config>,
    catalog: C,
}

impl<C: Catalog> AppState<C> {
    pub fn new(config: Config, catalog: C) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the repositories
    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}
