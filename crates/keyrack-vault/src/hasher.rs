// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-way Argon2id hashing for account login passwords.
//!
//! Account passwords are only ever verified, never recovered; a forgotten
//! password can be reset but not retrieved. This is the deliberate inverse
//! of [`crate::cipher`], which must be reversible.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use keyrack_core::KeyrackError;

/// Hash a login password into a PHC string with a fresh random salt.
///
/// Uses the crate's default Argon2id parameters (19 MiB, 2 iterations),
/// the adaptive-cost successor to the classic 10-round bcrypt setting.
pub fn hash(plaintext: &str) -> Result<String, KeyrackError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| KeyrackError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a login password against a stored PHC string.
///
/// Returns false on mismatch and on an unparseable stored hash; it never
/// errors, so a corrupted hash reads as a failed login rather than a 500.
pub fn verify(plaintext: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
