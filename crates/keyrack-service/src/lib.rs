// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Use-case orchestration for the Keyrack credential vault.
//!
//! The [`CredentialService`] owns the plaintext/ciphertext transform
//! boundary: account passwords are hashed before insert, vault secrets are
//! encrypted on write and decrypted on read. Plaintext never crosses into
//! the storage layer. Each use case follows a fixed validation order;
//! later checks depend on earlier ones succeeding.

pub mod service;

pub use service::{CredentialService, DecryptedSecret, SecretUpdateFields};
