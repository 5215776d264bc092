//! Operator surface over a real listener.

use dbroute::lifecycle::{self, Shutdown};
use dbroute::Backend;
use serde_json::Value;

mod common;
use common::{config_for, MockDatabase};

#[tokio::test]
async fn test_disable_and_enable_primary_over_http() {
    let primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let mut config = config_for(&primary, &secondary);
    config.health_check.enabled = false;

    let shutdown = Shutdown::new();
    let running = lifecycle::start(&config, &shutdown).await.unwrap();
    let base = format!("http://{}", running.admin_addr.unwrap());
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("{base}/api/db/disable-primary"))
        .bearer_auth("test-admin-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "h2 is disabled. Now using the backup postgres database."
    );
    assert_eq!(running.layer.router.resolve(), Backend::Secondary);
    assert!(!running.layer.enablement.is_enabled());

    let status: Value = client
        .get(format!("{base}/api/db/status"))
        .bearer_auth("test-admin-key")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["active_backend"], "SECONDARY");
    assert_eq!(status["monitor_enabled"], false);
    assert_eq!(status["secondary"], "postgres");

    let res = client
        .post(format!("{base}/api/db/enable-primary"))
        .bearer_auth("test-admin-key")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "h2 is back on.");
    assert_eq!(running.layer.router.resolve(), Backend::Primary);
    assert!(running.layer.enablement.is_enabled());

    shutdown.trigger();
    running.join().await;
}

#[tokio::test]
async fn test_unauthorized_override_changes_nothing() {
    let primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let mut config = config_for(&primary, &secondary);
    config.health_check.enabled = false;

    let shutdown = Shutdown::new();
    let running = lifecycle::start(&config, &shutdown).await.unwrap();
    let base = format!("http://{}", running.admin_addr.unwrap());
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .post(format!("{base}/api/db/disable-primary"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    assert_eq!(running.layer.router.resolve(), Backend::Primary);

    shutdown.trigger();
    running.join().await;
}

#[tokio::test]
async fn test_admin_bind_failure_is_reported() {
    let primary = MockDatabase::start().await;
    let secondary = MockDatabase::start().await;
    let mut config = config_for(&primary, &secondary);
    config.health_check.enabled = false;
    // Already taken by the mock primary.
    config.admin.bind_address = primary.addr.to_string();

    let err = lifecycle::start(&config, &Shutdown::new()).await.err().unwrap();
    assert!(matches!(err, lifecycle::StartupError::Bind { .. }));
}
