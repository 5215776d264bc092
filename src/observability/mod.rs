//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor, override control, admin API produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing
//! - Metrics go through the `metrics` facade and are free when no exporter is installed

pub mod logging;
pub mod metrics;
