//! End-to-end failover behaviour against real TCP backends.

use std::time::Duration;

use dbroute::health::TickOutcome;
use dbroute::lifecycle::{self, RoutingLayer, Shutdown};
use dbroute::Backend;

mod common;
use common::{config_for, MockDatabase};

#[tokio::test]
async fn test_probe_failure_override_and_recovery() {
    let mut primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let config = config_for(&primary, &secondary);

    let layer = RoutingLayer::from_config(&config).unwrap();
    let monitor = layer.health_monitor(&config.health_check);

    // Healthy primary
    assert!(matches!(
        monitor.tick().await.unwrap(),
        TickOutcome::Applied { ok: true, backend: Backend::Primary }
    ));
    assert_eq!(layer.router.resolve(), Backend::Primary);
    assert_eq!(layer.datasource.acquire().await.unwrap().backend(), Backend::Primary);

    // Primary goes away: one failed tick flips routing
    primary.stop().await;
    monitor.tick().await.unwrap();
    assert_eq!(layer.router.resolve(), Backend::Secondary);
    assert_eq!(layer.datasource.acquire().await.unwrap().backend(), Backend::Secondary);

    // Operator disables the primary; the monitor stops probing
    let status = layer.control.force_secondary();
    assert_eq!(status.active_backend, Backend::Secondary);
    assert!(!status.monitor_enabled);
    primary.restart().await;
    assert_eq!(monitor.tick().await.unwrap(), TickOutcome::Skipped);
    assert_eq!(layer.router.resolve(), Backend::Secondary);

    // Operator re-enables: PRIMARY immediately, monitor back in charge
    let status = layer.control.restore_primary();
    assert_eq!(status.active_backend, Backend::Primary);
    assert_eq!(layer.router.resolve(), Backend::Primary);

    monitor.tick().await.unwrap();
    assert_eq!(layer.router.resolve(), Backend::Primary);

    primary.stop().await;
    monitor.tick().await.unwrap();
    assert_eq!(layer.router.resolve(), Backend::Secondary);
}

#[tokio::test]
async fn test_restore_while_primary_down_flips_back() {
    let mut primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let config = config_for(&primary, &secondary);
    primary.stop().await;

    let layer = RoutingLayer::from_config(&config).unwrap();
    let monitor = layer.health_monitor(&config.health_check);

    layer.control.force_secondary();
    layer.control.restore_primary();
    assert_eq!(layer.router.resolve(), Backend::Primary);

    monitor.tick().await.unwrap();
    assert_eq!(layer.router.resolve(), Backend::Secondary);
}

#[tokio::test]
async fn test_override_holds_against_running_monitor() {
    let primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let mut config = config_for(&primary, &secondary);
    config.admin.enabled = false;

    let shutdown = Shutdown::new();
    let running = lifecycle::start(&config, &shutdown).await.unwrap();
    let layer = running.layer.clone();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(layer.router.resolve(), Backend::Primary);

    layer.control.force_secondary();
    // A probe already in flight may still land; re-asserting is a no-op otherwise.
    tokio::time::sleep(Duration::from_millis(100)).await;
    layer.control.force_secondary();

    // Several healthy-primary ticks elapse; the override must hold.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(layer.router.resolve(), Backend::Secondary);

    layer.control.restore_primary();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(layer.router.resolve(), Backend::Primary);

    shutdown.trigger();
    running.join().await;
}

#[tokio::test]
async fn test_monitor_fails_over_in_background() {
    let mut primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let mut config = config_for(&primary, &secondary);
    config.admin.enabled = false;

    let shutdown = Shutdown::new();
    let running = lifecycle::start(&config, &shutdown).await.unwrap();
    let router = running.layer.router.clone();

    primary.stop().await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(router.resolve(), Backend::Secondary);

    primary.restart().await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(router.resolve(), Backend::Primary);

    shutdown.trigger();
    running.join().await;
}
