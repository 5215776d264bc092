//! Startup orchestration.
//!
//! # Responsibilities
//! - Build routing state, pools, router and override control from config
//! - Spawn the health monitor task
//! - Bind and serve the admin API
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routing state exists before anything can read or write it
//! - The admin listener is bound last

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::admin::setup_admin_router;
use crate::config::{HealthCheckConfig, RouterConfig};
use crate::control::OverrideControl;
use crate::health::{HealthMonitor, MonitorEnablement, PoolProbe};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::pool::{PoolError, RoutingDataSource};
use crate::routing::{Backend, Router, RoutingState};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build connection pools: {0}")]
    Pool(#[from] PoolError),

    #[error("failed to bind admin API on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Every shared piece of the routing layer, wired together.
#[derive(Debug, Clone)]
pub struct RoutingLayer {
    pub state: Arc<RoutingState>,
    pub enablement: Arc<MonitorEnablement>,
    pub router: Router,
    pub datasource: RoutingDataSource,
    pub control: OverrideControl,
}

impl RoutingLayer {
    pub fn from_config(config: &RouterConfig) -> Result<Self, StartupError> {
        let state = Arc::new(RoutingState::new());
        let enablement = Arc::new(MonitorEnablement::default());
        let router = Router::new(state.clone());
        let datasource = RoutingDataSource::from_config(router.clone(), config)?;
        let control = OverrideControl::new(
            state.clone(),
            enablement.clone(),
            config.backends.primary.name.clone(),
            config.backends.secondary.name.clone(),
        );
        metrics::set_active_backend(state.get());

        Ok(Self {
            state,
            enablement,
            router,
            datasource,
            control,
        })
    }

    /// A monitor probing this layer's primary pool.
    pub fn health_monitor(&self, config: &HealthCheckConfig) -> HealthMonitor<PoolProbe> {
        let probe = PoolProbe::new(self.datasource.pool(Backend::Primary).clone(), config.timeout());
        HealthMonitor::new(Arc::new(probe), self.state.clone(), self.enablement.clone(), config.interval())
    }
}

/// A started routing layer and its background tasks.
pub struct Running {
    pub layer: RoutingLayer,
    /// Actual admin address, if the admin API is enabled.
    pub admin_addr: Option<SocketAddr>,
    tasks: Vec<JoinHandle<()>>,
}

impl Running {
    /// Wait for every background task to finish after shutdown was triggered.
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Background task ended abnormally");
            }
        }
    }
}

/// Build the routing layer and start its background tasks.
pub async fn start(config: &RouterConfig, shutdown: &Shutdown) -> Result<Running, StartupError> {
    let layer = RoutingLayer::from_config(config)?;
    let mut tasks = Vec::new();

    tracing::info!(
        primary = %config.backends.primary.name,
        primary_endpoint = %layer.datasource.pool(Backend::Primary).endpoint,
        secondary = %config.backends.secondary.name,
        secondary_endpoint = %layer.datasource.pool(Backend::Secondary).endpoint,
        "Routing layer initialised"
    );

    if config.health_check.enabled {
        let monitor = layer.health_monitor(&config.health_check);
        tasks.push(tokio::spawn(monitor.run(shutdown.subscribe())));
    } else {
        tracing::info!("Active health checks disabled, routing changes only by override");
    }

    let mut admin_addr = None;
    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address)
            .await
            .map_err(|source| StartupError::Bind {
                address: config.admin.bind_address.clone(),
                source,
            })?;
        let addr = listener.local_addr().map_err(|source| StartupError::Bind {
            address: config.admin.bind_address.clone(),
            source,
        })?;

        let app = setup_admin_router(layer.control.clone(), &config.admin);
        let stop = shutdown.wait();
        tasks.push(tokio::spawn(async move {
            tracing::info!(address = %addr, "Admin API listening");
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(stop).await {
                tracing::error!(error = %e, "Admin API stopped with error");
            }
            tracing::info!("Admin API stopped");
        }));
        admin_addr = Some(addr);
    }

    Ok(Running {
        layer,
        admin_addr,
        tasks,
    })
}
