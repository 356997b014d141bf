#![allow(clippy::unwrap_used)]
// End-to-end tests: Session over a real HTTP client against wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wakedeck_core::{
    CoreError, DeviceDraft, DeviceId, DeviceStatus, Notification, NotificationLevel, ScanOutcome,
    ScanState, Session, SessionConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let mut config = SessionConfig::new(Url::parse(&server.uri()).unwrap());
    config.refresh_interval = Duration::ZERO;
    let session = Session::new(config).unwrap();
    (server, session)
}

fn one_pc() -> serde_json::Value {
    json!({
        "devices": [{
            "id": "1",
            "name": "PC",
            "ip": "10.0.0.5",
            "mac": "AA:BB:CC:DD:EE:FF",
            "status": "online"
        }],
        "last_scan": "2024-01-01T00:00:00Z"
    })
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

async fn list_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/api/devices")
        .count()
}

// ── Load ────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_single_device_enables_wake() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;

    let snap = session.client().load().await.unwrap();

    assert_eq!(snap.len(), 1);
    let pc = &snap.devices()[0];
    assert_eq!(pc.status, DeviceStatus::Online);
    assert_eq!(pc.status.label(), "Online");
    assert!(pc.can_wake());
    assert!(snap.last_scan().is_some());
}

#[tokio::test]
async fn load_twice_is_identical() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;

    let first = session.client().load().await.unwrap();
    let second = session.client().load().await.unwrap();

    assert_eq!(*first, *second);
}

#[tokio::test]
async fn failed_load_empties_store() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;
    session.client().load().await.unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut rx = session.notifications();
    let err = session.client().load().await.unwrap_err();

    assert!(matches!(err, CoreError::Transport { status: Some(500), .. }));
    assert!(session.store().snapshot().is_empty());
    assert_eq!(drain(&mut rx)[0].level, NotificationLevel::Error);
}

// ── Scan ────────────────────────────────────────────────────────────

#[tokio::test]
async fn scan_reports_count_and_reloads() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "devices_found": 3 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut rx = session.notifications();
    let outcome = session.scheduler().scan().await.unwrap();

    assert_eq!(outcome, ScanOutcome::Completed { devices_found: 3 });
    assert_eq!(list_calls(&server).await, 1);
    assert_eq!(session.scheduler().state(), ScanState::Idle);

    let notes = drain(&mut rx);
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert!(notes[0].message.contains('3'));
}

#[tokio::test]
async fn slow_scan_rejects_second_request() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;
    Mock::given(method("POST"))
        .and(path("/scan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "devices_found": 1 }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scheduler = session.scheduler().clone();
    let first = tokio::spawn(async move { scheduler.scan().await });
    session
        .scheduler()
        .subscribe_state()
        .wait_for(|s| *s == ScanState::Scanning)
        .await
        .unwrap();

    assert_eq!(
        session.scheduler().scan().await.unwrap(),
        ScanOutcome::AlreadyRunning
    );

    first.await.unwrap().unwrap();
    assert_eq!(session.scheduler().state(), ScanState::Idle);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_with_empty_name_sends_nothing() {
    let (server, session) = setup().await;

    let err = session
        .client()
        .add_device(&DeviceDraft::new("", "10.0.0.1", None))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_surfaces_backend_message() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .and(path("/add_device"))
        .and(body_json(json!({ "name": "PC", "ip": "10.0.0.5", "mac": "" })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Device with this IP already exists" })),
        )
        .mount(&server)
        .await;

    let mut rx = session.notifications();
    let err = session
        .client()
        .add_device(&DeviceDraft::new("PC", "10.0.0.5", None))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Device with this IP already exists");
    assert_eq!(drain(&mut rx)[0].message, "Device with this IP already exists");
    assert_eq!(list_calls(&server).await, 0);
}

#[tokio::test]
async fn wake_dispatches_for_loaded_device() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;
    Mock::given(method("POST"))
        .and(path("/wake"))
        .and(body_json(json!({ "device_id": "1", "mac": "AA:BB:CC:DD:EE:FF" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    session.client().load().await.unwrap();
    session.client().wake_by_id(&DeviceId::from("1")).await.unwrap();
}

#[tokio::test]
async fn delete_then_reload() {
    let (server, session) = setup().await;
    mount_list(&server, json!([])).await;
    Mock::given(method("DELETE"))
        .and(path("/delete_device/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    session
        .client()
        .delete_device(&DeviceId::from("1"), |_| true)
        .await
        .unwrap();

    assert_eq!(list_calls(&server).await, 1);
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn discovery_yields_candidates_for_new_hosts() {
    let (server, session) = setup().await;
    mount_list(&server, one_pc()).await;
    Mock::given(method("POST"))
        .and(path("/discover"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "discovered": [
                { "ip": "10.0.0.5", "name": "pc.lan" },
                { "ip": "10.0.0.9", "mac": "11:22:33:44:55:66" }
            ]
        })))
        .mount(&server)
        .await;

    session.client().load().await.unwrap();
    let candidates = session.discovery().discover().await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].draft.name, "Unknown Device");
    assert_eq!(candidates[0].draft.ip, "10.0.0.9");
    assert_eq!(session.store().device_count(), 1);
}
