//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use dbroute::config::RouterConfig;

/// A TCP endpoint standing in for a database server.
///
/// Accepts and holds connections until stopped; once stopped, connects
/// are refused until [`MockDatabase::restart`] binds the same port again.
pub struct MockDatabase {
    pub addr: SocketAddr,
    task: Option<JoinHandle<()>>,
}

#[allow(dead_code)]
impl MockDatabase {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        Self {
            addr,
            task: Some(spawn_acceptor(listener)),
        }
    }

    pub fn url(&self) -> String {
        format!("postgres://{}/crm", self.addr)
    }

    pub async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }

    pub async fn restart(&mut self) {
        self.stop().await;
        let listener = TcpListener::bind(self.addr).await.unwrap();
        self.task = Some(spawn_acceptor(listener));
    }
}

impl Drop for MockDatabase {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn spawn_acceptor(listener: TcpListener) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    })
}

/// Config pointing at two mock databases, admin API on an ephemeral port.
#[allow(dead_code)]
pub fn config_for(primary: &MockDatabase, secondary: &MockDatabase) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.backends.primary.name = "h2".into();
    config.backends.primary.url = primary.url();
    config.backends.secondary.name = "postgres".into();
    config.backends.secondary.url = secondary.url();
    config.health_check.interval_ms = 50;
    config.health_check.timeout_ms = 50;
    config.admin.bind_address = "127.0.0.1:0".into();
    config.admin.api_key = "test-admin-key".into();
    config
}
