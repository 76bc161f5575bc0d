// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cryptographic primitives for the Keyrack credential vault.
//!
//! Two deliberately distinct primitives live here:
//!
//! - [`cipher::SecretCipher`]: reversible AES-256-GCM encryption for vault
//!   secrets, which must be recoverable.
//! - [`hasher`]: one-way salted Argon2id hashing for account login
//!   passwords, which are only ever verified, never recovered.

pub mod cipher;
pub mod hasher;

pub use cipher::SecretCipher;
