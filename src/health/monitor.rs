//! Background health monitor.
//!
//! # Responsibilities
//! - Periodically probe the primary backend
//! - Route to PRIMARY on a healthy probe, SECONDARY on a failed one
//! - Stay out of the way while an operator override is active
//!
//! # States
//! ```text
//! ACTIVE    → SUSPENDED: enablement set to false
//! SUSPENDED → ACTIVE:    enablement set to true
//! ```
//!
//! # Design Decisions
//! - One probe per tick, no retries; a single failure flips routing
//! - Probes run in their own task so a panicking probe only costs one cycle
//! - Fixed delay: the next tick starts one full interval after the previous
//!   one finished, however long the probe took
//! - The loop is never recreated on pause/resume, it just skips cycles

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time;

use crate::health::probe::{HealthProbe, ProbeResult};
use crate::observability::metrics;
use crate::routing::{Backend, RoutingState};

/// Whether the monitor may probe and write routing state.
#[derive(Debug)]
pub struct MonitorEnablement {
    enabled: AtomicBool,
}

impl MonitorEnablement {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

impl Default for MonitorEnablement {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A tick that failed for a reason other than an unhealthy primary.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("probe task failed: {0}")]
    ProbeTask(#[from] tokio::task::JoinError),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Monitor is suspended; nothing was probed or written.
    Skipped,
    /// Probe ran but the monitor was suspended before the result could be applied.
    Discarded { ok: bool },
    /// Probe ran and routing now points at `backend`.
    Applied { ok: bool, backend: Backend },
}

/// Shortest delay between ticks; smaller intervals are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct HealthMonitor<P> {
    probe: Arc<P>,
    state: Arc<RoutingState>,
    enablement: Arc<MonitorEnablement>,
    interval: Duration,
}

impl<P: HealthProbe> HealthMonitor<P> {
    /// `interval` is the delay between the end of one tick and the start of
    /// the next, at least [`MIN_INTERVAL`].
    pub fn new(
        probe: Arc<P>,
        state: Arc<RoutingState>,
        enablement: Arc<MonitorEnablement>,
        interval: Duration,
    ) -> Self {
        Self {
            probe,
            state,
            enablement,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Run the monitor until shutdown is signalled.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Health monitor starting");

        let mut was_enabled = self.enablement.is_enabled();

        loop {
            let enabled = self.enablement.is_enabled();
            if enabled != was_enabled {
                if enabled {
                    tracing::info!("Health monitor resumed");
                } else {
                    tracing::info!("Health monitor suspended by override");
                }
                was_enabled = enabled;
            }

            if let Err(e) = self.tick().await {
                tracing::warn!(error = %e, "Health check cycle failed, skipping");
            }

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Execute one monitor cycle.
    pub async fn tick(&self) -> Result<TickOutcome, MonitorError> {
        if !self.enablement.is_enabled() {
            tracing::trace!("Health monitor suspended, skipping cycle");
            return Ok(TickOutcome::Skipped);
        }

        let probe = self.probe.clone();
        let started = Instant::now();
        let result = tokio::spawn(async move { probe.run().await }).await?;
        metrics::record_probe(result.ok, started.elapsed());

        // An override may have landed while the probe was in flight.
        if !self.enablement.is_enabled() {
            tracing::debug!(ok = result.ok, "Monitor suspended during probe, discarding result");
            return Ok(TickOutcome::Discarded { ok: result.ok });
        }

        let backend = self.apply(result);
        Ok(TickOutcome::Applied {
            ok: backend == Backend::Primary,
            backend,
        })
    }

    fn apply(&self, result: ProbeResult) -> Backend {
        let target = if result.ok {
            tracing::debug!("Primary healthy");
            Backend::Primary
        } else {
            let error = result
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            tracing::error!(error = %error, "Primary is unavailable, switching to secondary");
            Backend::Secondary
        };

        let previous = self.state.replace(target);
        if previous != target {
            tracing::info!(from = %previous, to = %target, "Routing changed by health monitor");
            metrics::record_failover(target);
        }
        metrics::set_active_backend(target);
        target
    }
}
