// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Keyrack configuration system.

use keyrack_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_keyrack_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[storage]
database_path = "/tmp/test.db"

[vault]
master_key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(config.vault.master_key.is_some());
}

/// Unknown field in [server] section is rejected at load time.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
hots = "typo"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("hots"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 5000);
    assert_eq!(config.storage.database_path, "keyrack.db");
    assert!(config.vault.master_key.is_none());
}

/// Validation failures surface as a single Config error with every problem.
#[test]
fn load_and_validate_collects_all_problems() {
    let toml = r#"
[server]
port = 0

[vault]
master_key = "tooshort"
"#;

    let err = load_and_validate_str(toml).expect_err("should fail validation");
    let err_str = format!("{err}");
    assert!(err_str.contains("server.port"));
    assert!(err_str.contains("vault.master_key"));
}

/// A well-formed master key passes end-to-end.
#[test]
fn load_and_validate_accepts_well_formed_config() {
    let toml = r#"
[vault]
master_key = "ffeeddccbbaa99887766554433221100ffeeddccbbaa99887766554433221100"
"#;

    let config = load_and_validate_str(toml).expect("config should validate");
    assert_eq!(
        config.vault.master_key.as_deref().map(str::len),
        Some(64)
    );
}
