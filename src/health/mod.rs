//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Periodic timer (monitor.rs)
//!     → enablement check (skip while an override is active)
//!     → probe.rs (acquire + validate one primary connection)
//!     → RoutingState::set(PRIMARY | SECONDARY)
//! ```
//!
//! # Design Decisions
//! - Only the primary is probed; the secondary is the fallback by definition
//! - Probe failures are data, not errors
//! - Unexpected cycle failures are logged and the schedule continues

pub mod monitor;
pub mod probe;

pub use monitor::{HealthMonitor, MonitorEnablement, MonitorError, TickOutcome};
pub use probe::{HealthProbe, PoolProbe, ProbeError, ProbeResult};
