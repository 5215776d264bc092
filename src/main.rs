//! dbroute daemon
//!
//! ```text
//! persistence call ─▶ RoutingDataSource ─▶ Router::resolve() ─▶ PRIMARY | SECONDARY pool
//!                                                │
//!                                                ▼ get()
//!                                          RoutingState
//!                                           ▲        ▲
//!                              set() per tick│        │force / restore
//!                                 HealthMonitor    OverrideControl ◀─ admin API ◀─ operator
//! ```

use std::path::PathBuf;

use clap::Parser;

use dbroute::config::load_config;
use dbroute::lifecycle::{self, signals, Shutdown};
use dbroute::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "dbroute")]
#[command(about = "Dual-backend database routing with health-based failover")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "dbroute.toml")]
    config: PathBuf,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability)?;

    if args.validate {
        tracing::info!(path = ?args.config, "Configuration is valid");
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interval_ms = config.health_check.interval_ms,
        timeout_ms = config.health_check.timeout_ms,
        "dbroute starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::warn!(error = %e, "Failed to start metrics exporter. Continuing without metrics.");
                }
            }
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let running = lifecycle::start(&config, &shutdown).await?;

    signals::wait_for_signal().await;
    tracing::info!("Shutting down");
    shutdown.trigger();
    running.join().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
