//! CLI argument parsing and validation tests — no network I/O.
//!
//! These tests verify that invalid arguments and a missing credential are
//! rejected before any input is read or any adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

/// A command with no credential, no cassette, and no user config in scope.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pixelart").unwrap();
    cmd.env("PIXELART_CONFIG", "/nonexistent/pixelart/config.toml")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("PIXELART_REPLAY")
        .env_remove("PIXELART_REC")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_input_exits_with_usage() {
    cmd().assert().failure().stderr(predicate::str::contains("<INPUT>"));
}

#[test]
fn invalid_model_exits_with_error() {
    cmd()
        .args(["--model", "dall-e-3", "cat.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported model"));
}

#[test]
fn invalid_format_exits_with_error() {
    cmd()
        .args(["--format", "gif", "cat.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn missing_credential_fails_before_reading_input() {
    // The input does not exist; the credential check must fire first.
    cmd()
        .args(["/nonexistent/cat.png", "8bit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Gemini API key"))
        .stderr(predicate::str::contains("I/O error").not());
}

#[test]
fn blank_credential_is_rejected() {
    cmd()
        .env("GEMINI_API_KEY", "   ")
        .args(["/nonexistent/cat.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Gemini API key"));
}

#[test]
fn prompt_and_prompt_file_conflict() {
    cmd()
        .args(["cat.png", "8bit", "--prompt-file", "style.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
