//! Tests for `sealpost template`.

use crate::support::*;

#[test]
fn test_template_text_only() {
    let t = Test::console();
    t.write("templates/welcome.txt", "Hello {{ name }}!");

    let output = t.template("welcome", r#"{"name": "Alice"}"#, &["alice@example.com"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Subject: Templated");
    assert_stdout_contains(&output, "Hello Alice!");
    assert_stdout_excludes(&output, "text/html");
}

#[test]
fn test_template_with_html() {
    let t = Test::console();
    t.write("templates/welcome.txt", "Hello {{ name }}!");
    t.write("templates/welcome.html", "<h1>Hello {{ name }}</h1>");

    let output = t.template("welcome", r#"{"name": "Bob"}"#, &["bob@example.com"]);
    assert_success(&output);
    assert_stdout_contains(&output, "multipart/alternative");
    assert_stdout_contains(&output, "<h1>Hello Bob</h1>");
}

#[test]
fn test_template_namespaced_wins() {
    let t = Test::console();
    t.write("templates/welcome.txt", "generic");
    t.write("templates/sealpost/welcome.txt", "namespaced");

    let output = t.template("welcome", "{}", &["alice@example.com"]);
    assert_success(&output);
    assert_stdout_contains(&output, "namespaced");
    assert_stdout_excludes(&output, "generic");
}

#[test]
fn test_template_missing_text_fails() {
    let t = Test::file();
    t.write("templates/only.html", "<p>html only</p>");

    let output = t.template("only", "{}", &["alice@example.com"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "template not found");
    assert!(t.outbox().is_empty());
}

#[test]
fn test_template_context_file() {
    let t = Test::console();
    t.write("templates/report.txt", "{{ count }} items");
    t.write("ctx.json", r#"{"count": 7}"#);

    let output = t.run(&[
        "template",
        "--subject",
        "Report",
        "--template",
        "report",
        "--context-file",
        "ctx.json",
        "--to",
        "alice@example.com",
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "7 items");
}

#[test]
fn test_template_rejects_non_object_context() {
    let t = Test::console();
    t.write("templates/welcome.txt", "hi");

    let output = t.template("welcome", "[1, 2]", &["alice@example.com"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid template context");
}
