//! Tests that drive the `hn-digest` binary.

mod common;

use std::path::{Path, PathBuf};
use std::process::Command;

use common::fake_hn_api::FakeHnApi;
use common::story;
use tempfile::TempDir;

fn run_cli(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = PathBuf::from(env!("CARGO_BIN_EXE_hn-digest"));
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run hn-digest at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn offline_config(tmp: &TempDir, extra: &str) -> PathBuf {
    common::write_config(tmp, "http://127.0.0.1:1/v0", extra)
}

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();
    let config_path = offline_config(&tmp, "");

    let (stdout, stderr, success) = run_cli(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data").join("hn.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let tmp = TempDir::new().unwrap();
    let config_path = offline_config(&tmp, "");

    let (_, _, success1) = run_cli(&config_path, &["init"]);
    assert!(success1, "First init failed");
    let (_, _, success2) = run_cli(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_cli(&tmp.path().join("nope.json"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_unreachable_api_fails_run() {
    let tmp = TempDir::new().unwrap();
    let config_path = offline_config(&tmp, r#""request_timeout_secs": 2"#);

    let (stdout, stderr, success) = run_cli(&config_path, &["run"]);
    assert!(!success, "run should fail: stdout={}", stdout);
    assert!(stderr.contains("Fetch error"), "stderr={}", stderr);
}

#[test]
fn test_invalid_filter_pattern_fails_run() {
    let tmp = TempDir::new().unwrap();
    let config_path = offline_config(
        &tmp,
        r#""filters": [{"title": "broken", "value": "[a-"}]"#,
    );

    let (_, stderr, success) = run_cli(&config_path, &["run"]);
    assert!(!success);
    assert!(stderr.contains("Configuration error"), "stderr={}", stderr);
    assert!(!tmp.path().join("data").join("hn.sqlite").exists());
}

#[test]
fn test_purge_disabled_and_stats() {
    let tmp = TempDir::new().unwrap();
    let config_path = offline_config(&tmp, "");

    let (stdout, _, success) = run_cli(&config_path, &["purge", "--days", "0"]);
    assert!(success);
    assert!(stdout.contains("purge disabled"));

    let (stdout, _, success) = run_cli(&config_path, &["purge", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("would delete: 0"));

    let (stdout, stderr, success) = run_cli(&config_path, &["stats"]);
    assert!(success, "stats failed: {}", stderr);
    assert!(stdout.contains("Items:       0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_against_fake_api() {
    let api = FakeHnApi::start().await.unwrap();
    api.set_top_ids(&[1, 2, 3]).await;
    api.add_item(1, story(1, "On example", "http://example.com/x")).await;
    api.add_item(2, story(2, "On other", "http://other.com/y")).await;
    api.add_item(3, story(3, "No url", "")).await;

    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(
        &tmp,
        &api.base_url(),
        r#""blacklisted_domains": ["example.com"]"#,
    );

    let path = config_path.clone();
    let (stdout, stderr, success) = tokio::task::spawn_blocking(move || run_cli(&path, &["run"]))
        .await
        .unwrap();
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("committed: 1"));
    assert!(stdout.contains("discarded (blacklisted): 1"));
    assert!(stdout.contains("ok"));

    let path = config_path.clone();
    let (stdout, _, success) = tokio::task::spawn_blocking(move || run_cli(&path, &["run"]))
        .await
        .unwrap();
    assert!(success);
    assert!(stdout.contains("committed: 0"));
    assert!(stdout.contains("already stored: 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_leaves_no_database() {
    let api = FakeHnApi::start().await.unwrap();
    api.set_top_ids(&[1]).await;
    api.add_item(1, story(1, "one", "https://a.example/1")).await;

    let tmp = TempDir::new().unwrap();
    let config_path = common::write_config(&tmp, &api.base_url(), "");

    let (stdout, stderr, success) =
        tokio::task::spawn_blocking(move || run_cli(&config_path, &["run", "--dry-run"]))
            .await
            .unwrap();
    assert!(success, "dry run failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("run (dry-run)"));
    assert!(stdout.contains("would commit: 1"));
    assert!(!tmp.path().join("data").exists());
}
