//! Error reporting and argument handling.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_explicit_config() {
    let t = Test::new();

    let output = t.run(&["--config", "nope.toml", "addresses"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
    assert_stderr_contains(&output, "--config");
}

#[test]
fn test_malformed_config() {
    let t = Test::with_config("[email\nbackend = ");

    let output = t.run(&["addresses"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_file_backend_requires_path() {
    let t = Test::with_config(
        r#"
[email]
backend = "file"
"#,
    );

    let output = t.send("x", "y", &["alice@example.com"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "email.file_path");
}

#[test]
fn test_send_requires_recipient() {
    let t = Test::console();

    let output = t.run(&["send", "--subject", "x", "--body", "y"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--to");
}

#[test]
fn test_invalid_recipient_address() {
    let t = Test::console();

    let output = t.send("x", "y", &["not an address"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid email address");
}

#[test]
fn test_config_from_env() {
    let t = Test::new();
    t.write("conf/mail.toml", CONSOLE_CONFIG);

    let output = t
        .cmd()
        .env("SEALPOST_CONFIG", t.dir.path().join("conf/mail.toml"))
        .args(["send", "--subject", "Env", "--body", "b", "--to", "a@example.com"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Subject: Env");
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sealpost"));
}
