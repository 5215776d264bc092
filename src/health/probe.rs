//! Primary connectivity probe.
//!
//! # Responsibilities
//! - Acquire one connection from the primary pool
//! - Validate it within the configured timeout
//! - Capture every failure into a [`ProbeResult`]
//!
//! # Design Decisions
//! - Never returns an error to the caller; a failed probe is data
//! - The whole attempt (connect + validate) shares one deadline
//! - The connection is released as soon as the check finishes

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::pool::{BackendPool, PoolError};

/// Why a probe reported the primary as unhealthy.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error("connection validation failed: {0}")]
    Validation(#[from] io::Error),

    #[error("connection reported invalid")]
    Invalid,
}

/// Outcome of a single probe.
#[derive(Debug)]
pub struct ProbeResult {
    pub ok: bool,
    pub error: Option<ProbeError>,
}

impl ProbeResult {
    pub fn healthy() -> Self {
        Self { ok: true, error: None }
    }

    pub fn unhealthy(error: ProbeError) -> Self {
        Self {
            ok: false,
            error: Some(error),
        }
    }
}

/// A health check the monitor can run on its background task.
pub trait HealthProbe: Send + Sync + 'static {
    fn run(&self) -> impl Future<Output = ProbeResult> + Send;
}

/// Probes a backend by taking and validating one pooled connection.
#[derive(Debug, Clone)]
pub struct PoolProbe {
    pool: Arc<BackendPool>,
    timeout: Duration,
}

impl PoolProbe {
    pub fn new(pool: Arc<BackendPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn check(&self) -> Result<(), ProbeError> {
        let conn = self.pool.acquire().await?;
        if conn.is_valid(self.timeout).await? {
            Ok(())
        } else {
            Err(ProbeError::Invalid)
        }
    }
}

impl HealthProbe for PoolProbe {
    fn run(&self) -> impl Future<Output = ProbeResult> + Send {
        async move {
            match time::timeout(self.timeout, self.check()).await {
                Ok(Ok(())) => ProbeResult::healthy(),
                Ok(Err(e)) => ProbeResult::unhealthy(e),
                Err(_) => ProbeResult::unhealthy(ProbeError::Timeout(self.timeout)),
            }
        }
    }
}
