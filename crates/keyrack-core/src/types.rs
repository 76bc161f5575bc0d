// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain record types shared across the workspace.
//!
//! Timestamps are ISO 8601 strings (what SQLite stores and what the API
//! returns), ids are store-assigned UUIDs.

use serde::{Deserialize, Serialize};

/// An encrypted secret as persisted and transmitted: three independent
/// base64-encoded opaque strings.
///
/// Only the cipher produces or consumes this envelope. Decryption requires
/// all three fields verbatim; the triple is always replaced wholesale on
/// update, never partially rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    /// AES-256-GCM ciphertext, tag stripped.
    pub ciphertext: String,
    /// The 96-bit nonce used for this encryption, unique per call.
    pub nonce: String,
    /// The 128-bit GCM authentication tag.
    pub tag: String,
}

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    /// Argon2id PHC string. Never serialized outward; see [`UserProfile`].
    pub credential_hash: String,
    pub created_at: String,
}

impl UserAccount {
    /// The outward-facing view of this account, credential hash stripped.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// Account view returned to clients. Carries no credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

/// A persisted per-owner, per-site credential entry.
///
/// `owner_id` is a logical reference to a [`UserAccount`]; there is no
/// enforced foreign key. The `(owner_id, site)` pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSecretRecord {
    pub id: String,
    pub owner_id: String,
    /// Site label, e.g. a domain or service name.
    pub site: String,
    /// Login identity for that site. Distinct from the account email.
    pub login_email: String,
    #[serde(flatten)]
    pub secret: EncryptedSecret,
    #[serde(default)]
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}
