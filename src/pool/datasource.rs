//! Routing data source: the connection-acquisition boundary.
//!
//! Every persistence call asks the [`Router`] once, then takes a connection
//! from that backend's pool. A failed acquisition is returned as an ordinary
//! pool error; the other backend is never tried as a fallback.

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::pool::{BackendPool, PoolError, PooledConnection};
use crate::routing::{Backend, Router};

#[derive(Debug, Clone)]
pub struct RoutingDataSource {
    router: Router,
    primary: Arc<BackendPool>,
    secondary: Arc<BackendPool>,
}

impl RoutingDataSource {
    pub fn new(router: Router, primary: Arc<BackendPool>, secondary: Arc<BackendPool>) -> Self {
        Self {
            router,
            primary,
            secondary,
        }
    }

    /// Build both named pools from configuration.
    pub fn from_config(router: Router, config: &RouterConfig) -> Result<Self, PoolError> {
        let primary = BackendPool::from_config(Backend::Primary, &config.backends.primary)?;
        let secondary = BackendPool::from_config(Backend::Secondary, &config.backends.secondary)?;
        Ok(Self::new(router, Arc::new(primary), Arc::new(secondary)))
    }

    pub fn pool(&self, backend: Backend) -> &Arc<BackendPool> {
        match backend {
            Backend::Primary => &self.primary,
            Backend::Secondary => &self.secondary,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Acquire a connection from whichever backend routing currently prefers.
    pub async fn acquire(&self) -> Result<PooledConnection, PoolError> {
        let backend = self.router.resolve();
        let pool = self.pool(backend);
        pool.acquire().await.inspect_err(|e| {
            tracing::warn!(backend = %backend, name = %pool.name, error = %e, "Connection acquisition failed");
        })
    }
}
