//! Resilient dual-backend database routing layer.
//!
//! Picks the PRIMARY or SECONDARY database for every new connection,
//! re-checks primary health in the background and lets an operator
//! force the secondary for incident response.

pub mod admin;
pub mod config;
pub mod control;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod pool;
pub mod routing;

pub use config::RouterConfig;
pub use control::OverrideControl;
pub use lifecycle::{RoutingLayer, Shutdown};
pub use pool::RoutingDataSource;
pub use routing::{Backend, Router, RoutingState};
