// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Keyrack credential vault.
//!
//! This crate provides the error taxonomy and the domain record types shared
//! across the workspace. Everything else (crypto, storage, service, HTTP)
//! depends on this crate and nothing here depends on anything else.

pub mod error;
pub mod types;

pub use error::KeyrackError;
pub use types::{EncryptedSecret, UserAccount, UserProfile, VaultSecretRecord};
