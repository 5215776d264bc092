//! Shared routing state.
//!
//! # States
//! - Primary: new connections go to the primary pool
//! - Secondary: new connections go to the secondary pool
//!
//! # Design Decisions
//! - Stored as a single `AtomicU8`; readers never see a partial value
//! - Last writer wins, no compare-and-swap
//! - Starts at Primary

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;

/// Which physical database backend a connection is taken from.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Backend {
    Primary = 0,
    Secondary = 1,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Primary => "PRIMARY",
            Backend::Secondary => "SECONDARY",
        }
    }
}

impl From<u8> for Backend {
    fn from(val: u8) -> Self {
        // Only 0 and 1 are ever stored.
        match val {
            1 => Backend::Secondary,
            _ => Backend::Primary,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide preferred backend.
#[derive(Debug)]
pub struct RoutingState {
    current: AtomicU8,
}

impl RoutingState {
    pub fn new() -> Self {
        Self::with_backend(Backend::Primary)
    }

    pub fn with_backend(backend: Backend) -> Self {
        Self {
            current: AtomicU8::new(backend as u8),
        }
    }

    /// Current preferred backend. Never blocks.
    #[inline]
    pub fn get(&self) -> Backend {
        Backend::from(self.current.load(Ordering::Acquire))
    }

    /// Store a new preferred backend.
    #[inline]
    pub fn set(&self, backend: Backend) {
        self.current.store(backend as u8, Ordering::Release);
    }

    /// Store a new preferred backend and return the one it replaced.
    ///
    /// Used by writers that want to log transitions; readers only ever
    /// need [`get`](Self::get).
    pub fn replace(&self, backend: Backend) -> Backend {
        Backend::from(self.current.swap(backend as u8, Ordering::AcqRel))
    }
}

impl Default for RoutingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_defaults_to_primary() {
        assert_eq!(RoutingState::new().get(), Backend::Primary);
        assert_eq!(RoutingState::default().get(), Backend::Primary);
    }

    #[test]
    fn test_set_is_idempotent() {
        let state = RoutingState::new();
        state.set(Backend::Secondary);
        state.set(Backend::Secondary);
        assert_eq!(state.get(), Backend::Secondary);

        assert_eq!(state.replace(Backend::Primary), Backend::Secondary);
        assert_eq!(state.get(), Backend::Primary);
    }

    #[test]
    fn test_concurrent_set_get_never_torn() {
        let state = Arc::new(RoutingState::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let state = state.clone();
            handles.push(thread::spawn(move || {
                for n in 0..10_000 {
                    if (i + n) % 2 == 0 {
                        state.set(Backend::Primary);
                    } else {
                        state.set(Backend::Secondary);
                    }
                    let seen = state.get();
                    assert!(matches!(seen, Backend::Primary | Backend::Secondary));
                    assert!(state.current.load(Ordering::Relaxed) <= 1);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_serializes_as_key() {
        assert_eq!(serde_json::to_string(&Backend::Secondary).unwrap(), "\"SECONDARY\"");
        assert_eq!(Backend::Primary.to_string(), "PRIMARY");
    }
}
