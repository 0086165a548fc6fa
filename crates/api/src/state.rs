//! Shared state handed to every request handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;

/// Immutable state cloned into each handler.
///
/// Cheaply cloneable via `Arc`; gives handlers access to the database pool
/// and configuration (including the JWT signing secret).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
}

impl AppState {
    /// Bundle config and pool behind an `Arc`.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Borrow the shared connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
