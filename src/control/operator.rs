//! Manual routing override.
//!
//! # Responsibilities
//! - Force all new connections onto the secondary backend
//! - Hand routing authority back to the health monitor
//!
//! # Design Decisions
//! - Two independent atomic writes, ordered so the monitor is suspended
//!   before routing is forced and routing is reset before it resumes
//! - Neither operation can fail; both report the resulting state

use std::sync::Arc;

use serde::Serialize;

use crate::health::MonitorEnablement;
use crate::observability::metrics;
use crate::routing::{Backend, RoutingState};

/// State after an override operation, plus a message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideStatus {
    pub active_backend: Backend,
    pub monitor_enabled: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct OverrideControl {
    state: Arc<RoutingState>,
    enablement: Arc<MonitorEnablement>,
    primary_name: String,
    secondary_name: String,
}

impl OverrideControl {
    pub fn new(
        state: Arc<RoutingState>,
        enablement: Arc<MonitorEnablement>,
        primary_name: impl Into<String>,
        secondary_name: impl Into<String>,
    ) -> Self {
        Self {
            state,
            enablement,
            primary_name: primary_name.into(),
            secondary_name: secondary_name.into(),
        }
    }

    /// Suspend the health monitor and route everything to SECONDARY.
    pub fn force_secondary(&self) -> OverrideStatus {
        self.enablement.set_enabled(false);
        let previous = self.state.replace(Backend::Secondary);

        tracing::warn!(
            from = %previous,
            primary = %self.primary_name,
            secondary = %self.secondary_name,
            "Primary disabled by operator"
        );
        metrics::record_override("disable_primary");
        metrics::set_active_backend(Backend::Secondary);

        OverrideStatus {
            active_backend: Backend::Secondary,
            monitor_enabled: false,
            message: format!(
                "{} is disabled. Now using the backup {} database.",
                self.primary_name, self.secondary_name
            ),
        }
    }

    /// Route to PRIMARY and let the health monitor take over again.
    ///
    /// The monitor re-evaluates on its next tick and flips back to
    /// SECONDARY if the primary is still unhealthy.
    pub fn restore_primary(&self) -> OverrideStatus {
        let previous = self.state.replace(Backend::Primary);
        self.enablement.set_enabled(true);

        tracing::info!(from = %previous, primary = %self.primary_name, "Primary re-enabled by operator");
        metrics::record_override("enable_primary");
        metrics::set_active_backend(Backend::Primary);

        OverrideStatus {
            active_backend: Backend::Primary,
            monitor_enabled: true,
            message: format!("{} is back on.", self.primary_name),
        }
    }

    pub fn primary_name(&self) -> &str {
        &self.primary_name
    }

    pub fn secondary_name(&self) -> &str {
        &self.secondary_name
    }

    /// Current routing key and whether the monitor is in charge.
    pub fn snapshot(&self) -> (Backend, bool) {
        (self.state.get(), self.enablement.is_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> (OverrideControl, Arc<RoutingState>, Arc<MonitorEnablement>) {
        let state = Arc::new(RoutingState::new());
        let enablement = Arc::new(MonitorEnablement::default());
        let ctl = OverrideControl::new(state.clone(), enablement.clone(), "H2", "PostgreSQL");
        (ctl, state, enablement)
    }

    #[test]
    fn test_force_secondary() {
        let (ctl, state, enablement) = control();
        let status = ctl.force_secondary();

        assert_eq!(status.active_backend, Backend::Secondary);
        assert!(!status.monitor_enabled);
        assert_eq!(status.message, "H2 is disabled. Now using the backup PostgreSQL database.");
        assert_eq!(state.get(), Backend::Secondary);
        assert!(!enablement.is_enabled());
    }

    #[test]
    fn test_force_secondary_is_idempotent() {
        let (ctl, _, _) = control();
        let first = ctl.force_secondary();
        let after_first = ctl.snapshot();
        let second = ctl.force_secondary();

        assert_eq!(first, second);
        assert_eq!(after_first, ctl.snapshot());
    }

    #[test]
    fn test_restore_primary() {
        let (ctl, state, enablement) = control();
        ctl.force_secondary();
        let status = ctl.restore_primary();

        assert_eq!(status.active_backend, Backend::Primary);
        assert!(status.monitor_enabled);
        assert_eq!(status.message, "H2 is back on.");
        assert_eq!(state.get(), Backend::Primary);
        assert!(enablement.is_enabled());
    }
}
