// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage-facing model types.
//!
//! The canonical record types live in `keyrack-core::types`; this module
//! re-exports them and adds the insert/update shapes the query modules
//! accept.

pub use keyrack_core::types::{EncryptedSecret, UserAccount, VaultSecretRecord};

/// Fields for a new vault secret record. The id and timestamps are
/// store-assigned on insert.
#[derive(Debug, Clone)]
pub struct NewSecretRecord {
    pub owner_id: String,
    pub site: String,
    pub login_email: String,
    pub secret: EncryptedSecret,
    pub description: String,
}

/// Partial update for a vault secret record. `None` fields are left
/// untouched; a `Some(secret)` replaces the whole triple.
#[derive(Debug, Clone, Default)]
pub struct SecretRecordPatch {
    pub site: Option<String>,
    pub login_email: Option<String>,
    pub secret: Option<EncryptedSecret>,
    pub description: Option<String>,
}

impl SecretRecordPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.site.is_none()
            && self.login_email.is_none()
            && self.secret.is_none()
            && self.description.is_none()
    }
}

/// Result of an update-by-id: how many rows the filter matched and how many
/// were rewritten. SQLite reports rows matched by an UPDATE as its change
/// count, so the two values are equal here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: usize,
    pub modified: usize,
}
