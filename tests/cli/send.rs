//! Tests for `sealpost send`.

use crate::support::*;

#[test]
fn test_send_console_prints_message() {
    let t = Test::console();

    let output = t.send("Hello", "Plain body", &["alice@example.com"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Subject: Hello");
    assert_stdout_contains(&output, "To: alice@example.com");
    assert_stdout_contains(&output, "From: sender@example.com");
    assert_stdout_contains(&output, "Plain body");
    assert_stdout_contains(&output, "sent 1 message");
}

#[test]
fn test_send_one_message_per_recipient() {
    let t = Test::file();

    let output = t.send(
        "Fan out",
        "Same body",
        &["alice@example.com", "bob@example.com", "carol@example.com"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "sent 3 messages");

    let messages = t.outbox();
    assert_eq!(messages.len(), 3);
    for recipient in ["alice@example.com", "bob@example.com", "carol@example.com"] {
        let matching = messages
            .iter()
            .filter(|m| m.contains(&format!("To: {}", recipient)))
            .count();
        assert_eq!(matching, 1, "expected one message for {}", recipient);
    }
    assert!(messages.iter().all(|m| !m.contains("BEGIN PGP MESSAGE")));
}

#[test]
fn test_send_from_override() {
    let t = Test::console();

    let output = t.run(&[
        "send",
        "--subject",
        "Override",
        "--body",
        "x",
        "--to",
        "alice@example.com",
        "--from",
        "ops@example.com",
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "From: ops@example.com");
}

#[test]
fn test_send_body_file_and_html() {
    let t = Test::console();
    t.write("body.txt", "Text from file");
    t.write("body.html", "<p>Markup</p>");

    let output = t.run(&[
        "send",
        "--subject",
        "Both",
        "--body-file",
        "body.txt",
        "--html-file",
        "body.html",
        "--to",
        "alice@example.com",
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "multipart/alternative");
    assert_stdout_contains(&output, "text/html");
    assert_stdout_contains(&output, "Text from file");
}

#[test]
fn test_send_with_attachment() {
    let t = Test::console();
    t.write("notes.txt", "attached notes");

    let output = t.run(&[
        "send",
        "--subject",
        "Attached",
        "--body",
        "See attachment",
        "--to",
        "alice@example.com",
        "--attach",
        "notes.txt",
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "multipart/mixed");
    assert_stdout_contains(&output, "notes.txt");
}

#[test]
fn test_send_missing_attachment_sends_nothing() {
    let t = Test::file();

    let output = t.run(&[
        "send",
        "--subject",
        "Broken",
        "--body",
        "x",
        "--to",
        "alice@example.com",
        "--attach",
        "missing.pdf",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot read attachment");
    assert!(t.outbox().is_empty());
}

#[test]
fn test_send_unregistered_recipient_stays_plain_with_gpg_enabled() {
    let t = Test::with_config(
        r#"
[gnupg]
enabled = true

[email]
backend = "file"
file_path = "outbox"
"#,
    );

    // Nothing registered, so gpg is never consulted.
    let output = t.send("Plain", "Readable body", &["nobody@example.com"]);
    assert_success(&output);

    let messages = t.outbox();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Readable body"));
    assert!(messages[0].contains("From: webmaster@localhost"));
}

#[test]
fn test_send_unreachable_smtp_fails() {
    let t = Test::with_config(
        r#"
[gnupg]
enabled = false

[email]
host = "127.0.0.1"
port = 1
timeout_secs = 2
"#,
    );

    let output = t.send("Lost", "x", &["alice@example.com"]);
    assert_failure(&output);
}

#[test]
fn test_send_unreachable_smtp_fail_silently() {
    let t = Test::with_config(
        r#"
[gnupg]
enabled = false

[email]
host = "127.0.0.1"
port = 1
timeout_secs = 2
"#,
    );

    let output = t.run(&[
        "send",
        "--subject",
        "Lost",
        "--body",
        "x",
        "--to",
        "alice@example.com",
        "--fail-silently",
    ]);
    assert_success(&output);
}

#[test]
fn test_send_with_password_env_and_no_user() {
    let t = Test::console();

    let output = t
        .cmd()
        .env("SEALPOST_AUTH_PASSWORD", "pw")
        .args(["send", "--subject", "s", "--body", "b", "--to", "a@example.com"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Subject: s");
}

#[test]
fn test_send_auth_user_needs_password() {
    let t = Test::console();

    let output = t.run(&[
        "send",
        "--subject",
        "s",
        "--body",
        "b",
        "--to",
        "a@example.com",
        "--auth-user",
        "mailer",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--auth-password");
}
