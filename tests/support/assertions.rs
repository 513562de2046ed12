//! Assertions over captured `sealpost` output.

use std::process::Output;

/// Captured stdout, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "sealpost exited with {}\nstderr:\n{}",
        output.status,
        stderr(output)
    );
}

pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "sealpost unexpectedly succeeded\nstdout:\n{}",
        stdout(output)
    );
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let text = stdout(output);
    assert!(text.contains(needle), "expected {:?} on stdout:\n{}", needle, text);
}

pub fn assert_stdout_excludes(output: &Output, needle: &str) {
    let text = stdout(output);
    assert!(!text.contains(needle), "unexpected {:?} on stdout:\n{}", needle, text);
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let text = stderr(output);
    assert!(text.contains(needle), "expected {:?} on stderr:\n{}", needle, text);
}
