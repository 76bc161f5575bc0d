// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential service: register, authenticate, and the vault secret
//! CRUD use cases.
//!
//! Uniqueness probes here are a fast path for a friendly error message; the
//! storage layer's unique indexes are the authoritative guard, so two
//! requests racing past a probe still cannot both insert.

use keyrack_core::{KeyrackError, UserProfile};
use keyrack_storage::queries::{secrets, users};
use keyrack_storage::{Database, NewSecretRecord, SecretRecordPatch, UpdateOutcome};
use keyrack_vault::{SecretCipher, hasher};
use serde::Serialize;
use tracing::warn;

/// A vault secret as returned to its owner: plaintext recovered, triple
/// left behind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptedSecret {
    pub id: String,
    pub site: String,
    pub login_email: String,
    pub secret: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Updatable fields for a vault secret. All optional; at least one must be
/// present for an update to be valid.
#[derive(Debug, Clone, Default)]
pub struct SecretUpdateFields {
    pub site: Option<String>,
    pub login_email: Option<String>,
    /// New plaintext secret. Supplying one re-encrypts under a fresh nonce
    /// and tag; the old triple is discarded entirely.
    pub secret: Option<String>,
    pub description: Option<String>,
}

/// Orchestrates the hasher, the cipher, and the record store.
pub struct CredentialService {
    db: Database,
    cipher: SecretCipher,
}

impl CredentialService {
    /// Build a service over an open database and a loaded cipher key.
    pub fn new(db: Database, cipher: SecretCipher) -> Self {
        Self { db, cipher }
    }

    /// Register a new user account and return its id.
    ///
    /// Order: field presence, email uniqueness probe, hash, insert.
    pub async fn register_account(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<String, KeyrackError> {
        let email = required(email, "email")?;
        let password = required(password, "password")?;

        if users::find_by_email(&self.db, &email).await?.is_some() {
            return Err(KeyrackError::Conflict("email already registered".into()));
        }

        let credential_hash = hasher::hash(&password)?;
        let id = users::insert_user(&self.db, &email, &credential_hash).await?;
        tracing::info!(user_id = %id, "account registered");
        Ok(id)
    }

    /// Authenticate a login attempt, returning the profile with the
    /// credential hash stripped.
    ///
    /// Order: field presence, lookup (`NotFound`), verify (`Authentication`).
    pub async fn authenticate(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserProfile, KeyrackError> {
        let email = required(email, "email")?;
        let password = required(password, "password")?;

        let account = users::find_by_email(&self.db, &email)
            .await?
            .ok_or_else(|| KeyrackError::NotFound("user not found".into()))?;

        if !hasher::verify(&password, &account.credential_hash) {
            return Err(KeyrackError::Authentication("incorrect password".into()));
        }

        Ok(account.into_profile())
    }

    /// Add a vault secret for an owner and return its id.
    ///
    /// Order: field presence, (owner, site) uniqueness probe, encrypt,
    /// insert.
    pub async fn add_secret(
        &self,
        owner_id: Option<String>,
        site: Option<String>,
        login_email: Option<String>,
        secret: Option<String>,
        description: Option<String>,
    ) -> Result<String, KeyrackError> {
        let owner_id = required(owner_id, "userId")?;
        let site = required(site, "site")?;
        let login_email = required(login_email, "email")?;
        let secret = required(secret, "password")?;

        if secrets::find_by_owner_and_site(&self.db, &owner_id, &site)
            .await?
            .is_some()
        {
            return Err(KeyrackError::Conflict(
                "site already registered for this user".into(),
            ));
        }

        let sealed = self.cipher.encrypt(&secret)?;
        let id = secrets::insert_secret(
            &self.db,
            NewSecretRecord {
                owner_id,
                site,
                login_email,
                secret: sealed,
                description: description.unwrap_or_default(),
            },
        )
        .await?;
        tracing::info!(secret_id = %id, "vault secret added");
        Ok(id)
    }

    /// List an owner's secrets with plaintext recovered.
    ///
    /// A record whose triple fails to decrypt or decode is omitted from the
    /// response with a warning; one corrupt record never fails the batch.
    pub async fn list_secrets(&self, owner_id: &str) -> Result<Vec<DecryptedSecret>, KeyrackError> {
        let owner_id = required(Some(owner_id.to_string()), "userId")?;

        let records = secrets::find_by_owner(&self.db, &owner_id).await?;
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            match self.cipher.decrypt(&record.secret) {
                Ok(plaintext) => entries.push(DecryptedSecret {
                    id: record.id,
                    site: record.site,
                    login_email: record.login_email,
                    secret: plaintext,
                    description: record.description,
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                }),
                Err(e) => {
                    warn!(secret_id = %record.id, error = %e, "skipping undecryptable vault record");
                }
            }
        }
        Ok(entries)
    }

    /// Update a vault secret by id.
    ///
    /// At least one field must be supplied. A new plaintext secret is
    /// re-encrypted under a brand-new nonce and tag.
    pub async fn update_secret(
        &self,
        id: &str,
        fields: SecretUpdateFields,
    ) -> Result<UpdateOutcome, KeyrackError> {
        let id = required(Some(id.to_string()), "id")?;

        if fields.site.is_none()
            && fields.login_email.is_none()
            && fields.secret.is_none()
            && fields.description.is_none()
        {
            return Err(KeyrackError::Validation("no fields to update".into()));
        }

        let sealed = match &fields.secret {
            Some(plaintext) => Some(self.cipher.encrypt(plaintext)?),
            None => None,
        };
        let patch = SecretRecordPatch {
            site: fields.site,
            login_email: fields.login_email,
            secret: sealed,
            description: fields.description,
        };

        let outcome = secrets::update_by_id(&self.db, &id, patch).await?;
        if outcome.matched == 0 {
            return Err(KeyrackError::NotFound("secret not found".into()));
        }
        tracing::info!(secret_id = %id, "vault secret updated");
        Ok(outcome)
    }

    /// Delete a vault secret by id, returning how many records were removed.
    pub async fn delete_secret(&self, id: &str) -> Result<usize, KeyrackError> {
        let id = required(Some(id.to_string()), "id")?;

        let deleted = secrets::delete_by_id(&self.db, &id).await?;
        if deleted == 0 {
            return Err(KeyrackError::NotFound("secret not found".into()));
        }
        tracing::info!(secret_id = %id, "vault secret deleted");
        Ok(deleted)
    }
}

/// Presence check for a required request field. Empty and whitespace-only
/// values count as missing, matching the truthiness check they replace.
fn required(value: Option<String>, field: &str) -> Result<String, KeyrackError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(KeyrackError::Validation(format!("{field} is required"))),
    }
}
