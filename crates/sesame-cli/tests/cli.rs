//! CLI integration tests against an on-disk session store.

mod common;

use tempfile::TempDir;

use sesame_core::{TokenCodec, TokenPayload, traits::SystemClock};

use common::{read_stored_token, run_cli, run_cli_json, run_cli_success, write_stored_token};

#[test]
fn test_login_whoami_logout() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    // No session yet
    let output = run_cli(&["auth", "whoami"], data);
    assert!(!output.status.success());

    let stdout = run_cli_success(
        &["auth", "login", "--username", "admin", "--password", "anypass"],
        data,
    );
    assert!(stdout.contains("Logged in successfully"));
    assert!(read_stored_token(data).is_some());

    let stdout = run_cli_success(&["auth", "whoami"], data);
    assert!(stdout.contains("admin"));

    run_cli_success(&["auth", "logout"], data);
    assert_eq!(read_stored_token(data), None);

    let output = run_cli(&["auth", "whoami"], data);
    assert!(!output.status.success());
}

#[test]
fn test_whoami_without_session_reports_once() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(&["auth", "whoami"], temp_dir.path());
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches('✗').count(), 1, "stderr: {}", stderr);
    assert!(stderr.contains("Not logged in"));
    assert!(stderr.contains("TOKEN_MISSING"));
}

#[test]
fn test_login_rejects_unknown_user() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    let (ok, record) = run_cli_json(
        &["auth", "login", "--username", "guest", "--password", "pw"],
        data,
    );

    assert!(!ok);
    assert_eq!(record["success"], false);
    assert_eq!(record["code"], "INVALID_USERNAME");
    assert_eq!(read_stored_token(data), None);
}

#[test]
fn test_login_requires_password() {
    let temp_dir = TempDir::new().unwrap();
    let (ok, record) = run_cli_json(
        &["auth", "login", "--username", "admin", "--password", "  "],
        temp_dir.path(),
    );

    assert!(!ok);
    assert_eq!(record["code"], "PASSWORD_REQUIRED");
}

#[test]
fn test_secured_action_needs_session() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    let (ok, record) = run_cli_json(&["demo", "secured", "--action-type", "x"], data);
    assert!(!ok);
    assert_eq!(record["code"], "TOKEN_MISSING");

    run_cli_success(
        &["auth", "login", "--username", "admin", "--password", "pw"],
        data,
    );

    let (ok, record) = run_cli_json(&["demo", "secured", "--action-type", "x"], data);
    assert!(ok);
    assert_eq!(record["data"]["actionType"], "x");
    assert_eq!(record["data"]["userId"], "admin");
}

#[test]
fn test_garbage_stored_token_is_purged() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();
    write_stored_token(data, "garbage-not-base64");

    let output = run_cli(&["auth", "whoami"], data);
    assert!(!output.status.success());
    assert_eq!(read_stored_token(data), None);
}

#[test]
fn test_expired_stored_token_is_purged() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();
    let token = TokenCodec::<SystemClock>::encode(&TokenPayload {
        user_id: "admin".to_string(),
        issued_at: 0,
        expires_at: 3600,
    });
    write_stored_token(data, token.as_str());

    let (ok, record) = run_cli_json(&["demo", "secured"], data);
    assert!(!ok);
    assert_eq!(record["code"], "TOKEN_MISSING");
    assert_eq!(read_stored_token(data), None);
}

#[test]
fn test_corrupt_storage_file_reads_as_logged_out() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();
    std::fs::write(data.join("storage.json"), "{not json").unwrap();

    let output = run_cli(&["auth", "whoami"], data);
    assert!(!output.status.success());

    run_cli_success(
        &["auth", "login", "--username", "admin", "--password", "pw"],
        data,
    );
    assert!(read_stored_token(data).is_some());
}

#[test]
fn test_greeting_needs_no_session() {
    let temp_dir = TempDir::new().unwrap();

    for _ in 0..2 {
        let (ok, record) = run_cli_json(&["demo", "greeting"], temp_dir.path());
        assert!(ok);
        assert_eq!(record["success"], true);
        assert!(record["data"]["message"].is_string());
    }
}

#[test]
fn test_resilient_action_outcomes() {
    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path();

    let (ok, record) = run_cli_json(&["demo", "resilient", "--failure-rate", "0"], data);
    assert!(ok);
    assert_eq!(record["data"]["attempts"], 1);

    let (ok, record) = run_cli_json(
        &["demo", "resilient", "--failure-rate", "1", "--max-attempts", "4"],
        data,
    );
    assert!(!ok);
    assert_eq!(record["code"], "RETRIES_EXHAUSTED");

    let output = run_cli(&["demo", "resilient", "--failure-rate", "1"], data);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error after retries"));
}
