//! Operator control subsystem.
//!
//! # Data Flow
//! ```text
//! Admin API / CLI
//!     → operator.rs (OverrideControl)
//!         disable primary: suspend monitor → route SECONDARY
//!         enable primary:  route PRIMARY → resume monitor
//! ```
//!
//! # Design Decisions
//! - Overrides last until explicitly restored
//! - Races with an in-flight probe are tolerated; the last write wins

pub mod operator;

pub use operator::{OverrideControl, OverrideStatus};
