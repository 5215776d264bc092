//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Writers (health monitor, operator override)
//!     → state.rs (atomic Backend cell, last writer wins)
//!
//! Connection acquisition
//!     → router.rs (resolve: read state)
//!     → Return: Backend::Primary or Backend::Secondary
//! ```
//!
//! # Design Decisions
//! - One lock-free cell shared via Arc
//! - Router is consulted once per acquisition, never per operation
//! - No ordering guarantees beyond the atomic store itself

pub mod router;
pub mod state;

pub use router::Router;
pub use state::{Backend, RoutingState};
