//! Per-backend connection pool.
//!
//! # Responsibilities
//! - Open connections to a single database backend
//! - Enforce max connection limits
//! - Track in-use connections (released on drop)
//! - Cheap liveness validation of an acquired connection

use std::future;
use std::io;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;

use tokio::io::ReadBuf;
use tokio::net::TcpStream;
use tokio::time;

use crate::config::BackendConfig;
use crate::pool::{Endpoint, PoolError};
use crate::routing::Backend;

/// Connection pool for one physical backend.
#[derive(Debug)]
pub struct BackendPool {
    /// Routing key this pool serves.
    pub role: Backend,
    /// Operator facing label, e.g. "postgres".
    pub name: String,
    pub endpoint: Endpoint,
    /// Maximum concurrent connections allowed.
    pub max_connections: usize,
    /// Number of connections currently handed out.
    in_use: AtomicUsize,
}

impl BackendPool {
    pub fn new(role: Backend, name: impl Into<String>, endpoint: Endpoint, max_connections: usize) -> Self {
        Self {
            role,
            name: name.into(),
            endpoint,
            max_connections,
            in_use: AtomicUsize::new(0),
        }
    }

    /// Build a pool from its configuration section.
    pub fn from_config(role: Backend, config: &BackendConfig) -> Result<Self, PoolError> {
        let endpoint = Endpoint::parse(&config.url)?;
        Ok(Self::new(role, config.name.clone(), endpoint, config.max_connections))
    }

    /// Number of connections currently checked out.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Relaxed)
    }

    /// Reserve a slot, or `None` when the pool is exhausted.
    fn try_reserve(self: &Arc<Self>) -> Option<SlotGuard> {
        let mut prev = self.in_use.load(Ordering::Relaxed);
        loop {
            if prev >= self.max_connections {
                return None;
            }
            match self.in_use.compare_exchange_weak(prev, prev + 1, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => break,
                Err(x) => prev = x,
            }
        }
        Some(SlotGuard { pool: self.clone() })
    }

    /// Acquire a connection to this backend.
    pub async fn acquire(self: &Arc<Self>) -> Result<PooledConnection, PoolError> {
        let slot = self.try_reserve().ok_or_else(|| PoolError::Exhausted {
            name: self.name.clone(),
            max: self.max_connections,
        })?;

        let stream = TcpStream::connect((self.endpoint.host.as_str(), self.endpoint.port))
            .await
            .map_err(|source| PoolError::Connect {
                name: self.name.clone(),
                endpoint: self.endpoint.to_string(),
                source,
            })?;

        tracing::trace!(backend = %self.name, in_use = self.in_use(), "Connection acquired");

        Ok(PooledConnection { stream, slot })
    }
}

/// Releases a pool slot on drop.
#[derive(Debug)]
struct SlotGuard {
    pool: Arc<BackendPool>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.pool.in_use.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A connection checked out of a [`BackendPool`].
///
/// The pool slot is released when this value is dropped.
#[derive(Debug)]
pub struct PooledConnection {
    stream: TcpStream,
    slot: SlotGuard,
}

impl PooledConnection {
    /// Backend this connection was taken from.
    pub fn backend(&self) -> Backend {
        self.slot.pool.role
    }

    pub fn pool(&self) -> &BackendPool {
        &self.slot.pool
    }

    /// Check that the connection is still usable.
    ///
    /// Waits at most `timeout` for the socket to become writable, then
    /// makes sure the peer has not already closed it. Pending inbound bytes
    /// are peeked, never consumed.
    pub async fn is_valid(&self, timeout: Duration) -> io::Result<bool> {
        match time::timeout(timeout, self.stream.writable()).await {
            Ok(ready) => ready?,
            Err(_) => return Ok(false),
        }

        if let Some(err) = self.stream.take_error()? {
            return Err(err);
        }

        let mut byte = [0u8; 1];
        let mut buf = ReadBuf::new(&mut byte);
        let peeked = future::poll_fn(|cx| match self.stream.poll_peek(cx, &mut buf) {
            // Nothing to read yet: still open.
            Poll::Pending => Poll::Ready(None),
            Poll::Ready(res) => Poll::Ready(Some(res)),
        })
        .await;

        match peeked {
            None => Ok(true),
            // Orderly shutdown by the peer.
            Some(Ok(0)) => Ok(false),
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) if e.kind() == io::ErrorKind::WouldBlock => Ok(true),
            Some(Err(e)) => Err(e),
        }
    }
}

impl Deref for PooledConnection {
    type Target = TcpStream;
    fn deref(&self) -> &Self::Target {
        &self.stream
    }
}
