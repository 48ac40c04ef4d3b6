//! Integration tests for the racedash CLI
//!
//! Commands run as a real process against a mock telemetry backend; exit codes
//! and stdout documents are checked.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn racedash() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("racedash")?;
    cmd.env_remove("RACEDASH_API_BASE").env_remove("RUST_LOG");
    Ok(cmd)
}

/// Custom predicate to check if output is valid JSON
fn is_json() -> impl predicates::Predicate<[u8]> {
    predicates::function::function(|s: &[u8]| {
        std::str::from_utf8(s)
            .map(|text| serde_json::from_str::<Value>(text).is_ok())
            .unwrap_or(false)
    })
}

async fn telemetry_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "track": 9,
            "sessionType": 15,
            "currentLap": 12,
            "nbLaps": 70,
            "airTemperature": 28,
            "trackTemperature": 41,
            "flag": "🟢"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "GARAGE", "position": 0},
            {"name": "LECLERC", "position": 3, "tyres": 17, "teamId": 1, "lastLapTime": 89706},
            {"name": "VERSTAPPEN", "position": 1, "tyres": 18, "teamId": 2}
        ])))
        .mount(&server)
        .await;
    server
}

fn unreachable_base() -> Result<String, Box<dyn std::error::Error>> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let base = format!("http://{}", listener.local_addr()?);
    drop(listener);
    Ok(base)
}

// ─── Static commands ─────────────────────────────────────────────────────────

#[test]
fn test_cli_help() -> TestResult {
    racedash()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("race telemetry"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    racedash()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("racedash"));
    Ok(())
}

#[test]
fn test_completion_generation() -> TestResult {
    racedash()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("racedash"));
    Ok(())
}

#[test]
fn test_lookup_human() -> TestResult {
    racedash()?
        .args(["lookup", "track", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hungaroring"));
    Ok(())
}

#[test]
fn test_lookup_json_with_negative_code() -> TestResult {
    let output = racedash()?
        .args(["--json", "lookup", "ers", "-1"])
        .assert()
        .success()
        .stdout(is_json())
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output)?;
    assert_eq!(doc["lookup"]["label"], "PRIVATE");
    assert_eq!(doc["lookup"]["code"], -1);
    Ok(())
}

#[test]
fn test_lookup_unmapped_code_falls_back() -> TestResult {
    racedash()?
        .args(["lookup", "tyre", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-"));
    Ok(())
}

#[test]
fn test_lookup_unknown_table_exit_code() -> TestResult {
    racedash()?
        .args(["lookup", "weather", "1"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown lookup table"));
    Ok(())
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[test]
fn test_invalid_config_file_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let config = dir.path().join("racedash.yaml");
    fs::write(&config, "poll_interval_ms: 0\n")?;

    racedash()?
        .args(["snapshot", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(4);
    Ok(())
}

#[test]
fn test_invalid_api_base_exit_code() -> TestResult {
    racedash()?
        .args(["--json", "snapshot", "--api-base", "localhost"])
        .assert()
        .failure()
        .code(4)
        .stdout(is_json());
    Ok(())
}

#[test]
fn test_malformed_port_is_configuration_error() -> TestResult {
    racedash()?
        .args(["snapshot", "--api-base", "http://pitwall:notaport"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("api_base"));
    Ok(())
}

#[test]
fn test_unreachable_backend_exit_code() -> TestResult {
    racedash()?
        .args(["snapshot", "--api-base", unreachable_base()?.as_str()])
        .assert()
        .failure()
        .code(5);
    Ok(())
}

// ─── Against a live backend ──────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_snapshot_dashboard_json() -> TestResult {
    let server = telemetry_backend().await;

    let output = racedash()?
        .args(["--json", "snapshot", "--api-base", server.uri().as_str()])
        .assert()
        .success()
        .stdout(is_json())
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output)?;
    assert_eq!(doc["session"]["track_name"], "Hungaroring");
    assert_eq!(doc["session"]["lap"], "12/70");
    assert_eq!(doc["driver"]["name"], "LECLERC");
    assert_eq!(doc["driver"]["team"], "Ferrari");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_snapshot_leaderboard_human() -> TestResult {
    let server = telemetry_backend().await;

    racedash()?
        .env("RACEDASH_API_BASE", server.uri())
        .args(["snapshot", "--view", "leaderboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VERSTAPPEN"))
        .stdout(predicate::str::contains("1:29.706"))
        .stdout(predicate::str::contains("GARAGE").not());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_snapshot_backend_error_exit_code() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    racedash()?
        .args(["snapshot", "--api-base", server.uri().as_str()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("HTTP 500"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_stops_after_cycles() -> TestResult {
    let server = telemetry_backend().await;

    let output = racedash()?
        .args([
            "--json",
            "watch",
            "--view",
            "trackmap",
            "--interval-ms",
            "20",
            "--cycles",
            "3",
            "--api-base",
            server.uri().as_str(),
        ])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output)?;
    let docs: Vec<Value> = text
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(docs.len(), 3);
    for doc in &docs {
        assert_eq!(doc["markers"].as_array().map(Vec::len), Some(2));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_keeps_polling_through_failures() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "HAMILTON", "position": 1}
        ])))
        .mount(&server)
        .await;

    racedash()?
        .args([
            "watch",
            "--view",
            "leaderboard",
            "--interval-ms",
            "20",
            "--cycles",
            "2",
            "--api-base",
            server.uri().as_str(),
        ])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("HAMILTON"))
        .stderr(predicate::str::contains("HTTP 503"));
    Ok(())
}
