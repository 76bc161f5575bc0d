// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Keyrack credential vault.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides. Configuration is read once at startup; nothing
//! re-reads it at request time.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_str};
pub use model::KeyrackConfig;

use keyrack_core::KeyrackError;

/// Load configuration from the XDG hierarchy and validate it.
///
/// 1. Loads config from TOML files + env vars via Figment.
/// 2. Runs post-deserialization validation.
///
/// All validation failures are collected into a single `Config` error so an
/// operator sees every problem at once.
pub fn load_and_validate() -> Result<KeyrackConfig, KeyrackError> {
    let config = loader::load_config()
        .map_err(|e| KeyrackError::Config(e.to_string()))?;
    validation::validate_config(&config)
        .map_err(|errors| KeyrackError::Config(errors.join("; ")))?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it. Used by tests and
/// explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<KeyrackConfig, KeyrackError> {
    let config = loader::load_config_from_str(toml_content)
        .map_err(|e| KeyrackError::Config(e.to_string()))?;
    validation::validate_config(&config)
        .map_err(|errors| KeyrackError::Config(errors.join("; ")))?;
    Ok(config)
}
