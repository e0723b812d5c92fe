//! Integration tests for the `shade` binary.
//!
//! Every test runs in its own temporary directory with the environment
//! scrubbed, so nothing reads the developer's configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = r#"{
    "1A1": [{"name": "", "start": "G1", "stop": "G2"}],
    "1B2": [
        {"name": "North", "start": "N1", "stop": "N2"},
        {"name": "South", "start": "S1", "stop": "S2"}
    ],
    "2X5": [{"name": "", "start": "X1", "stop": "X2"}]
}"#;

const SCRUBBED_ENV: &[&str] = &[
    "SHADE_CONFIG",
    "SERVER_IP",
    "SERVER_PORT_A",
    "SERVER_PORT_B",
    "SERVER_PORT_C",
    "CURTAINS_USERNAME",
    "CURTAINS_PASSWORD",
    "MD5_VALUE",
    "REPORTS_FILE",
    "RUST_LOG",
];

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shade` binary running inside `dir`.
fn shade_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shade");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"));
    for var in SCRUBBED_ENV {
        cmd.env_remove(var);
    }
    for (key, _) in std::env::vars().filter(|(k, _)| k.starts_with("SHADE_")) {
        cmd.env_remove(key);
    }
    cmd
}

/// A workspace with the catalog in place and a config pointing at
/// `host:port` over plain HTTP.
fn workspace(port: u16) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rooms.json"), CATALOG).unwrap();
    std::fs::write(
        dir.path().join("shade.toml"),
        format!(
            r#"
[gateway]
scheme = "http"
host = "127.0.0.1"
username_base = "curtains"
password = "pw"
md5 = "feedface"
timeout_secs = 2

[gateway.ports]
A = {port}
B = {port}
C = {port}
"#
        ),
    )
    .unwrap();
    dir
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = shade_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    shade_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("serve")
            .and(predicate::str::contains("control"))
            .and(predicate::str::contains("register")),
    );
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    shade_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shade"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_default_config_is_toml() {
    let dir = tempfile::tempdir().unwrap();
    shade_cmd(dir.path())
        .arg("default-config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[gateway]")
                .and(predicate::str::contains("[server]"))
                .and(predicate::str::contains("[catalog]")),
        );
}

#[test]
fn test_check_config_missing_host() {
    let dir = tempfile::tempdir().unwrap();
    shade_cmd(dir.path())
        .arg("check-config")
        .assert()
        .code(9)
        .stderr(predicate::str::contains("gateway.host"));
}

#[test]
fn test_check_config_hides_secrets() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .arg("check-config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"rooms\": 3")
                .and(predicate::str::contains("feedface").not())
                .and(predicate::str::contains("\"pw\"").not()),
        );
}

#[test]
fn test_legacy_env_configures_gateway() {
    let dir = workspace(9001);
    std::fs::remove_file(dir.path().join("shade.toml")).unwrap();
    shade_cmd(dir.path())
        .arg("check-config")
        .env("SERVER_IP", "192.0.2.7")
        .env("SERVER_PORT_A", "9101")
        .env("SERVER_PORT_B", "9102")
        .env("SERVER_PORT_C", "9103")
        .env("CURTAINS_USERNAME", "curtains")
        .env("CURTAINS_PASSWORD", "pw")
        .env("MD5_VALUE", "feedface")
        .assert()
        .success()
        .stdout(predicate::str::contains("192.0.2.7").and(predicate::str::contains("9103")));
}

// ── Catalog queries ─────────────────────────────────────────────────

#[test]
fn test_rooms_lists_catalog() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .arg("rooms")
        .assert()
        .success()
        .stdout(predicate::str::contains("1B2").and(predicate::str::contains("South")));
}

#[test]
fn test_register_known_room() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .args(["register", "1b2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("North"));
}

#[test]
fn test_register_unknown_room() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .args(["register", "9Z9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("9Z9"));
}

#[test]
fn test_missing_catalog_is_config_error() {
    let dir = workspace(9001);
    std::fs::remove_file(dir.path().join("rooms.json")).unwrap();
    shade_cmd(dir.path()).arg("rooms").assert().code(9);
}

// ── Control ─────────────────────────────────────────────────────────

#[test]
fn test_control_invalid_building() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .args(["control", "2X5", "up"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("building"));
}

#[test]
fn test_control_invalid_action() {
    let dir = workspace(9001);
    shade_cmd(dir.path())
        .args(["control", "1A1", "open"])
        .assert()
        .code(2);
}

#[test]
fn test_control_unreachable_gateway() {
    // Nothing listens on port 1.
    let dir = workspace(1);
    shade_cmd(dir.path())
        .args(["control", "1A1", "up"])
        .assert()
        .code(7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_control_sends_command() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/iphone/send"))
        .and(body_string_contains("username=curtainsB\r\n"))
        .and(body_string_contains("group=N1\r\n"))
        .and(body_string_contains("value=1\r\n"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&gateway)
        .await;

    let dir = workspace(gateway.address().port());
    let assert = tokio::task::spawn_blocking(move || {
        shade_cmd(dir.path())
            .args(["control", "1B2", "down", "-d", "North"])
            .assert()
    })
    .await
    .unwrap();

    assert.success().stdout(
        predicate::str::contains("success")
            .and(predicate::str::contains("Curtain in room 1B2 down command sent successfully.")),
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_control_gateway_rejection() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&gateway)
        .await;

    let dir = workspace(gateway.address().port());
    let assert = tokio::task::spawn_blocking(move || {
        shade_cmd(dir.path()).args(["control", "1A1", "stop"]).assert()
    })
    .await
    .unwrap();

    assert
        .code(6)
        .stderr(predicate::str::contains("500").and(predicate::str::contains("internal")));
}
