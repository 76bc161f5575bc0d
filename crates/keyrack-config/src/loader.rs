// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./keyrack.toml` > `~/.config/keyrack/keyrack.toml`
//! > `/etc/keyrack/keyrack.toml` with environment variable overrides via the
//! `KEYRACK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::KeyrackConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/keyrack/keyrack.toml` (system-wide)
/// 3. `~/.config/keyrack/keyrack.toml` (user XDG config)
/// 4. `./keyrack.toml` (local directory)
/// 5. `KEYRACK_*` environment variables
pub fn load_config() -> Result<KeyrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyrackConfig::default()))
        .merge(Toml::file("/etc/keyrack/keyrack.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("keyrack/keyrack.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("keyrack.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<KeyrackConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(KeyrackConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `KEYRACK_VAULT_MASTER_KEY` must map to
/// `vault.master_key`, not `vault.master.key`.
fn env_provider() -> Env {
    Env::prefixed("KEYRACK_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("vault_", "vault.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.database_path, "keyrack.db");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            database_path = "/var/lib/keyrack/vault.db"

            [vault]
            master_key = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.database_path, "/var/lib/keyrack/vault.db");
        assert!(config.vault.master_key.is_some());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [server]
            hots = "typo"
            "#,
        );
        assert!(result.is_err());
    }
}
