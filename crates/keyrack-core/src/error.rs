// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Keyrack credential vault.

use thiserror::Error;

/// The primary error type used across all Keyrack crates.
///
/// The first five variants form the client-visible taxonomy; the HTTP layer
/// maps them to status codes. `Storage`, `Config`, and `Internal` are
/// operational failures whose detail goes to the log, never to the caller.
#[derive(Debug, Error)]
pub enum KeyrackError {
    /// Missing or malformed input. Client-fixable.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (email or owner+site already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad login credentials, or an authentication tag that failed to verify.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A persisted ciphertext/nonce/tag triple is corrupted. Surfaced per
    /// record, never for a whole request batch.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Storage backend errors (connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (missing key, invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors (RNG failure, cipher setup).
    #[error("internal error: {0}")]
    Internal(String),
}

impl KeyrackError {
    /// True for errors a client can fix by changing its request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Conflict(_) | Self::NotFound(_) | Self::Authentication(_)
        )
    }
}
