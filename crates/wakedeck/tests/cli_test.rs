//! Integration tests for the `wakedeck` CLI binary.
//!
//! Argument parsing, help output, completions and exit codes, plus a few
//! end-to-end runs against a wiremock backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wakedeck` binary with env isolation.
///
/// Clears all `WAKEDECK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wakedeck_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wakedeck");
    cmd.env("HOME", "/tmp/wakedeck-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wakedeck-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("WAKEDECK_PROFILE")
        .env_remove("WAKEDECK_URL")
        .env_remove("WAKEDECK_OUTPUT")
        .env_remove("WAKEDECK_TIMEOUT")
        .env_remove("WAKEDECK_INTERVAL")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(args: &[&str]) -> std::process::Output {
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || wakedeck_cmd().args(&args).output().unwrap())
        .await
        .unwrap()
}

/// Like [`run`], with `XDG_CONFIG_HOME` pointing at `config_home`.
async fn run_with_config(config_home: &std::path::Path, args: &[&str]) -> std::process::Output {
    let home = config_home.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        wakedeck_cmd()
            .env("XDG_CONFIG_HOME", &home)
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn write_config(body: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("wakedeck");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::write(app.join("config.toml"), body).unwrap();
    dir
}

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [{
                "id": "1",
                "name": "PC",
                "ip": "10.0.0.5",
                "mac": "AA:BB:CC:DD:EE:FF",
                "status": "online"
            }],
            "last_scan": "2024-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;
    server
}

async fn requests_to(server: &MockServer, method_name: &str, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == method_name && r.url.path() == route)
        .count()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wakedeck_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wakedeck_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("LAN device dashboard")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("wake"))
            .and(predicate::str::contains("discover")),
    );
}

#[test]
fn test_version_flag() {
    wakedeck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wakedeck"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    wakedeck_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    wakedeck_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = wakedeck_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    wakedeck_cmd()
        .args(["devices", "list", "--output", "xml"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_add_requires_name_and_ip_flags() {
    wakedeck_cmd().args(["add", "--ip", "10.0.0.9"]).assert().failure().code(2);
}

#[test]
fn test_bad_url_is_usage_error() {
    let output = wakedeck_cmd()
        .args(["devices", "list", "--url", "ftp://nas"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("http(s)"));
}

#[test]
fn test_unknown_profile() {
    let output = wakedeck_cmd()
        .args(["devices", "list", "--profile", "office"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("office"));
}

#[test]
fn test_unreachable_backend_exit_code() {
    wakedeck_cmd()
        .args(["devices", "list", "--url", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .code(7);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    wakedeck_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_json() {
    let output = wakedeck_cmd()
        .args(["config", "show", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["default_profile"], "default");
    assert_eq!(shown["defaults"]["refresh_interval"], 30);
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_json() {
    let server = backend().await;

    let output = run(&["devices", "list", "--output", "json", "--url", &server.uri()]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 1);
    assert_eq!(devices[0]["name"], "PC");
    assert_eq!(devices[0]["status"], "online");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_table_has_summary() {
    let server = backend().await;

    run(&["devices", "list", "--url", &server.uri()])
        .await
        .assert()
        .success()
        .stdout(
            predicate::str::contains("10.0.0.5")
                .and(predicate::str::contains("1 device · 1 online")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_get_unknown_is_not_found() {
    let server = backend().await;

    run(&["devices", "get", "99", "--url", &server.uri()])
        .await
        .assert()
        .failure()
        .code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wake_by_ip() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/wake"))
        .and(body_json(json!({ "device_id": "1", "mac": "AA:BB:CC:DD:EE:FF" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    run(&["wake", "10.0.0.5", "--url", &server.uri()])
        .await
        .assert()
        .success()
        .stderr(predicate::str::contains("Wake-on-LAN packet sent to PC"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ping_json() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/ping"))
        .and(body_json(json!({ "ip": "10.0.0.5" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "reachable": true, "response_time": 3.0 })),
        )
        .mount(&server)
        .await;

    let output = run(&["ping", "1", "--output", "json-compact", "--url", &server.uri()]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["target"], "PC");
    assert_eq!(outcome["reachable"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_invalid_ip_sends_nothing() {
    let server = backend().await;

    let output = run(&["add", "--name", "TV", "--ip", "10.0.0.256", "--url", &server.uri()]).await;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(requests_to(&server, "POST", "/add_device").await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_rejected_by_backend() {
    let server = backend().await;
    Mock::given(method("POST"))
        .and(path("/add_device"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Device with this IP already exists" })),
        )
        .mount(&server)
        .await;

    let output = run(&["add", "--name", "PC", "--ip", "10.0.0.5", "--url", &server.uri()]).await;

    assert_eq!(output.status.code(), Some(8));
    assert!(combined_output(&output).contains("Device with this IP already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_is_refused() {
    let server = backend().await;

    run(&["delete", "1", "--url", &server.uri()])
        .await
        .assert()
        .failure()
        .code(2);

    assert_eq!(requests_to(&server, "DELETE", "/delete_device/1").await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes() {
    let server = backend().await;
    Mock::given(method("DELETE"))
        .and(path("/delete_device/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    run(&["delete", "1", "--yes", "--url", &server.uri()])
        .await
        .assert()
        .success()
        .stderr(predicate::str::contains("Device PC deleted successfully"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_keeps_omitted_fields() {
    let server = backend().await;
    Mock::given(method("PUT"))
        .and(path("/update_device/1"))
        .and(body_json(json!({ "name": "Desktop", "ip": "10.0.0.5", "mac": "AA:BB:CC:DD:EE:FF" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    run(&["update", "1", "--name", "Desktop", "--url", &server.uri()])
        .await
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "wol-dashboard"
        })))
        .mount(&server)
        .await;

    run(&["health", "--output", "plain", "--url", &server.uri()])
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_default_output_is_used() {
    let server = backend().await;
    let home = write_config("[defaults]\noutput = \"json\"\n");

    let output = run_with_config(home.path(), &["devices", "list", "--url", &server.uri()]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let devices: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices[0]["name"], "PC");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_output_flag_beats_config_default() {
    let server = backend().await;
    let home = write_config("[defaults]\noutput = \"json\"\n");

    run_with_config(
        home.path(),
        &["devices", "list", "--output", "table", "--url", &server.uri()],
    )
    .await
    .assert()
    .success()
    .stdout(predicate::str::contains("1 device · 1 online"));
}

#[test]
fn test_bad_config_output_is_usage_error() {
    let home = write_config("[defaults]\noutput = \"xml\"\n");

    let output = wakedeck_cmd()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["devices", "list"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("defaults.output"));
}
