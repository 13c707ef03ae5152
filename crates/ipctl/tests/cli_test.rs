//! Integration tests for the `ipctl` CLI binary.
//!
//! Parsing, help output, completions and error exits run without a platform;
//! the remaining tests point a temporary profile at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ipctl` binary with env isolation.
///
/// Clears all `IPCTL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn ipctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ipctl");
    cmd.env("HOME", "/tmp/ipctl-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ipctl-cli-test-nonexistent")
        .env_remove("IPCTL_CONFIG")
        .env_remove("IPCTL_PROFILE")
        .env_remove("IPCTL_OUTPUT")
        .env_remove("IPCTL_TIMEOUT")
        .env_remove("IPCTL_PASSWORD")
        .env_remove("IPCTL_CLIENT_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// A config file with a single `lab` profile on `127.0.0.1:port`.
fn lab_config(port: u16) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
default_profile = "lab"

[profiles.lab]
host = "127.0.0.1"
port = {port}
use_tls = false
username = "admin"
password = "s3cret"
"#
    )
    .unwrap();
    file
}

async fn platform_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;
    server
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = ipctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    ipctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("automation platform")
            .and(predicate::str::contains("workflows"))
            .and(predicate::str::contains("models"))
            .and(predicate::str::contains("projects")),
    );
}

#[test]
fn test_version_flag() {
    ipctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ipctl"));
}

#[test]
fn test_models_delete_help_lists_cascade_flags() {
    ipctl_cmd()
        .args(["models", "delete", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--delete-instances")
                .and(predicate::str::contains("--delete-related")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    ipctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    ipctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ipctl"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = ipctl_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_output_format() {
    let output = ipctl_cmd()
        .args(["-o", "xml", "workflows", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("xml"), "Expected rejected value in output:\n{text}");
}

#[test]
fn test_add_member_requires_account_or_group() {
    let output = ipctl_cmd()
        .args(["projects", "add-member", "Demo"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_add_member_rejects_unknown_role() {
    let output = ipctl_cmd()
        .args(["projects", "add-member", "Demo", "--account", "bob", "--role", "boss"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    ipctl_cmd()
        .args(["config", "path", "--config", "/tmp/ipctl-elsewhere.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/ipctl-elsewhere.toml"));
}

#[test]
fn test_config_show_masks_secrets() {
    let config = lab_config(9);
    ipctl_cmd()
        .args(["config", "show", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("127.0.0.1")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("s3cret").not()),
        );
}

#[test]
fn test_config_profiles_marks_active() {
    let config = lab_config(9);
    ipctl_cmd()
        .args(["config", "profiles", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("* lab"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let config = lab_config(9);
    let output = ipctl_cmd()
        .args(["--profile", "nope", "workflows", "list", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("nope"), "Expected profile name in output:\n{text}");
    assert!(text.contains("lab"), "Expected available profiles in output:\n{text}");
}

#[test]
fn test_profile_without_host_is_rejected() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(config, "[profiles.default]\nusername = \"admin\"\n").unwrap();

    let output = ipctl_cmd()
        .args(["whoami", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("host is required"));
}

#[test]
fn test_destructive_verb_without_tty_requires_yes() {
    // No request is made before the confirmation check.
    let config = lab_config(9);
    let output = ipctl_cmd()
        .args(["workflows", "clear", "--config"])
        .arg(config.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

// ── Against a mock platform ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_workflow_exits_not_found() {
    let server = platform_server().await;
    Mock::given(method("GET"))
        .and(path("/automation-studio/workflows"))
        .and(query_param("equals[name]", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let config = lab_config(server.address().port());
    let mut cmd = ipctl_cmd();
    cmd.args(["workflows", "get", "ghost", "--config"])
        .arg(config.path());
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("workflow not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_accounts_list_as_json() {
    let server = platform_server().await;
    Mock::given(method("GET"))
        .and(path("/authorization/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"_id": "u1", "username": "admin", "provenance": "Local AAA"},
                {"_id": "u2", "username": "bob", "provenance": "Local AAA", "inactive": true}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let config = lab_config(server.address().port());
    let mut cmd = ipctl_cmd();
    cmd.args(["-o", "json", "accounts", "list", "--config"])
        .arg(config.path());
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let accounts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(accounts[0]["username"], "admin");
    assert_eq!(accounts[1]["inactive"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plain_output_lists_names() {
    let server = platform_server().await;
    Mock::given(method("GET"))
        .and(path("/authorization/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"_id": "u1", "username": "admin"}, {"_id": "u2", "username": "bob"}],
            "total": 2
        })))
        .mount(&server)
        .await;

    let config = lab_config(server.address().port());
    let mut cmd = ipctl_cmd();
    cmd.args(["-o", "plain", "accounts", "list", "--config"])
        .arg(config.path());
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "admin\nbob\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let config = lab_config(server.address().port());
    let mut cmd = ipctl_cmd();
    cmd.args(["whoami", "--config"]).arg(config.path());
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
