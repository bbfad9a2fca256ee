//! End-to-end session flow: configured timeout, warning window, expiry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use vigil_session::{
    resolve_timeout, ActivityKind, AlertConfigPatch, ConfigService, FileStore, IdleTimer,
    ManualClock, SessionRunner, StaticProvider, UnavailableProvider, WarningCoordinator,
    DEFAULT_TIMEOUT,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test(start_paused = true)]
async fn configured_session_warns_then_expires_once() {
    init_tracing();

    // Persisted configuration: warn in the last 30 seconds.
    let temp = TempDir::new().expect("temp dir");
    let store = FileStore::new(temp.path().to_path_buf()).expect("file store");
    let service = ConfigService::new(store);
    let config = service.update_warning(AlertConfigPatch {
        threshold_seconds: Some(30),
        ..Default::default()
    });

    // Externally configured two-minute window.
    let timeout = resolve_timeout(&StaticProvider::new(2), DEFAULT_TIMEOUT).await;
    assert_eq!(timeout, Duration::from_secs(120));

    let clock = ManualClock::new();
    let timer = IdleTimer::with_timeout(clock.clone(), timeout);
    let coordinator = WarningCoordinator::new(clock.clone(), config);

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let (runner, mut handle) = SessionRunner::new(timer, coordinator, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let task = tokio::spawn(runner.run());

    // One minute in, with a little activity: no warning, no expiry.
    clock.advance(Duration::from_secs(60));
    assert!(handle.record_activity(ActivityKind::PointerMove).await);
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snapshot = handle.snapshot();
    assert!(!snapshot.expired);
    assert!(!snapshot.warning.show_alert);

    // Idle into the warning window.
    clock.advance(Duration::from_secs(95));
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snapshot = handle.snapshot();
    assert!(!snapshot.expired);
    assert!(snapshot.warning.show_alert);
    assert!(snapshot.warning.time_remaining <= 30);

    // Idle past the end of the window.
    clock.advance(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snapshot = handle.snapshot();
    assert!(snapshot.expired);
    assert!(!snapshot.warning.show_alert);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Stray activity after expiry must not resurrect the session.
    assert!(handle.record_activity(ActivityKind::Click).await);
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(handle.snapshot().expired);
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    assert!(handle.shutdown());
    task.await.expect("runner task");
}

#[tokio::test(start_paused = true)]
async fn unreachable_duration_endpoint_falls_back_to_default() {
    init_tracing();

    let timeout = resolve_timeout(&UnavailableProvider, DEFAULT_TIMEOUT).await;
    assert_eq!(timeout, DEFAULT_TIMEOUT);

    let clock = ManualClock::new();
    let timer = IdleTimer::with_timeout(clock.clone(), timeout);
    assert_eq!(timer.remaining_seconds(), 1800);
}

#[tokio::test(start_paused = true)]
async fn warning_config_survives_restart() {
    init_tracing();

    let temp = TempDir::new().expect("temp dir");

    {
        let store = FileStore::new(temp.path().to_path_buf()).expect("file store");
        let service = ConfigService::new(store);
        service.update_warning(AlertConfigPatch {
            threshold_seconds: Some(120),
            enabled: Some(false),
            ..Default::default()
        });
    }

    // A fresh service over the same directory, as after a reload.
    let store = FileStore::new(temp.path().to_path_buf()).expect("file store");
    let service = ConfigService::new(store);
    let config = service.warning_config();
    assert_eq!(config.threshold_seconds, 120);
    assert!(!config.enabled);

    // A disabled warning never shows, even deep in the window.
    let coordinator = WarningCoordinator::new(ManualClock::new(), config);
    assert!(!coordinator.evaluate(Duration::from_secs(10)).show_alert);
}
