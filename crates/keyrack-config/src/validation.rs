// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as a well-formed bind address and a correctly sized
//! master key.

use crate::model::KeyrackConfig;

/// Hex characters in a 256-bit key.
const MASTER_KEY_HEX_LEN: usize = 64;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<String>)` with all
/// collected validation errors (does not fail fast).
pub fn validate_config(config: &KeyrackConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        errors.push("server.port must not be 0".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push("storage.database_path must not be empty".to_string());
    }

    // The key is optional at load time (keygen does not need one), but when
    // present it must decode to exactly 256 bits.
    if let Some(key) = &config.vault.master_key {
        let key = key.trim();
        if key.len() != MASTER_KEY_HEX_LEN || hex::decode(key).is_err() {
            errors.push(format!(
                "vault.master_key must be {MASTER_KEY_HEX_LEN} hex characters (256-bit key)"
            ));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
