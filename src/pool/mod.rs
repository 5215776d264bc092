//! Connection pool subsystem.
//!
//! # Data Flow
//! ```text
//! Persistence call
//!     → datasource.rs (Router::resolve, once per acquisition)
//!     → backend.rs (pool for PRIMARY or SECONDARY)
//!     → PooledConnection (slot released on drop)
//! ```
//!
//! # Design Decisions
//! - One independently sized pool per backend
//! - Pool limits enforced with an atomic counter, no locks
//! - No cross-backend retry: acquisition errors go straight back to the caller

pub mod backend;
pub mod datasource;
pub mod endpoint;

pub use backend::{BackendPool, PooledConnection};
pub use datasource::RoutingDataSource;
pub use endpoint::Endpoint;

/// Errors returned by connection acquisition.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("pool '{name}' exhausted ({max} connections in use)")]
    Exhausted { name: String, max: usize },

    #[error("failed to connect to '{name}' at {endpoint}: {source}")]
    Connect {
        name: String,
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid backend address {0}")]
    InvalidAddress(String),
}
