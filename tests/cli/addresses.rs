//! Tests for `sealpost addresses`.

use crate::support::*;

#[test]
fn test_addresses_empty() {
    let t = Test::console();

    let output = t.run(&["addresses"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no registered addresses");
}

#[test]
fn test_addresses_lists_registry() {
    let t = Test::console();
    t.write(
        ".sealpost/addresses.toml",
        r#"
[addresses]
"alice@example.com" = "AAAA1111"
"bob@example.com" = "BBBB2222"
"#,
    );

    let output = t.addresses_json();
    assert_success(&output);

    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["address"], "alice@example.com");
    assert_eq!(entries[0]["fingerprint"], "AAAA1111");
    assert_eq!(entries[1]["address"], "bob@example.com");
}
