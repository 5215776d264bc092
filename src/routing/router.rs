//! Backend selection for new connections.
//!
//! # Responsibilities
//! - Answer "which pool?" for every connection acquisition
//!
//! # Design Decisions
//! - Read-only: never writes routing state
//! - Not cached per operation; an operation that acquires several
//!   connections may see different backends if routing flips in between

use std::sync::Arc;

use crate::routing::state::{Backend, RoutingState};

/// Resolves the routing key for the next connection.
#[derive(Debug, Clone)]
pub struct Router {
    state: Arc<RoutingState>,
}

impl Router {
    pub fn new(state: Arc<RoutingState>) -> Self {
        Self { state }
    }

    /// Backend to acquire the next connection from. Never blocks.
    #[inline]
    pub fn resolve(&self) -> Backend {
        self.state.get()
    }
}
