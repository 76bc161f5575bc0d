// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open for vault secrets.
//!
//! Every call to [`SecretCipher::encrypt`] generates a fresh random 96-bit
//! nonce via the system CSPRNG. Nonce reuse under the same key would be
//! catastrophic for GCM security, so nonces are never derived from record
//! identity or counters.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use keyrack_core::{EncryptedSecret, KeyrackError};
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;
/// GCM authentication tag length in bytes (128 bits).
const TAG_LEN: usize = 16;

/// Authenticated symmetric cipher over a single long-lived 256-bit key.
///
/// The key is supplied once at process start; there is no rotation path.
/// Loss of the key makes all existing encrypted secrets permanently
/// unrecoverable.
pub struct SecretCipher {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SecretCipher {
    /// Build a cipher from a hex-encoded 256-bit key (64 hex characters).
    pub fn from_hex(key_hex: &str) -> Result<Self, KeyrackError> {
        let bytes = hex::decode(key_hex.trim()).map_err(|_| {
            KeyrackError::Config("vault.master_key is not valid hex".to_string())
        })?;
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            KeyrackError::Config(format!(
                "vault.master_key must be {KEY_LEN} bytes ({} hex characters)",
                KEY_LEN * 2
            ))
        })?;
        Ok(Self {
            key: Zeroizing::new(key),
        })
    }

    /// Encrypt a plaintext secret, producing the persisted triple.
    ///
    /// The ciphertext, nonce, and tag are returned as three independent
    /// base64-encoded strings. All three must be stored together; decryption
    /// requires all of them verbatim.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret, KeyrackError> {
        let less_safe = self.sealing_key()?;

        let rng = SystemRandom::new();
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill(&mut nonce_bytes)
            .map_err(|_| KeyrackError::Internal("failed to generate random nonce".to_string()))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // Seal in place: the buffer is extended with the authentication tag,
        // which we then split off so the triple is stored as three fields.
        let mut in_out = plaintext.as_bytes().to_vec();
        less_safe
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| KeyrackError::Internal("AES-256-GCM encryption failed".to_string()))?;
        let tag = in_out.split_off(in_out.len() - TAG_LEN);

        Ok(EncryptedSecret {
            ciphertext: BASE64.encode(&in_out),
            nonce: BASE64.encode(nonce_bytes),
            tag: BASE64.encode(&tag),
        })
    }

    /// Decrypt a persisted triple back to the plaintext secret.
    ///
    /// A field that fails to decode or has the wrong length is a
    /// [`KeyrackError::MalformedRecord`]; a tag that does not verify (wrong
    /// key, corrupted data, mismatched nonce) is
    /// [`KeyrackError::Authentication`]. No partial plaintext is surfaced on
    /// failure.
    pub fn decrypt(&self, secret: &EncryptedSecret) -> Result<String, KeyrackError> {
        let ciphertext = decode_field(&secret.ciphertext, "ciphertext")?;
        let nonce_raw = decode_field(&secret.nonce, "nonce")?;
        let tag = decode_field(&secret.tag, "tag")?;

        let nonce_bytes: [u8; NONCE_LEN] = nonce_raw.try_into().map_err(|_| {
            KeyrackError::MalformedRecord(format!("nonce must be {NONCE_LEN} bytes"))
        })?;
        if tag.len() != TAG_LEN {
            return Err(KeyrackError::MalformedRecord(format!(
                "authentication tag must be {TAG_LEN} bytes"
            )));
        }

        let less_safe = self.sealing_key()?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let mut in_out = ciphertext;
        in_out.extend_from_slice(&tag);
        let plaintext = less_safe
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| {
                KeyrackError::Authentication(
                    "tag verification failed -- wrong key or corrupted data".to_string(),
                )
            })?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| {
            KeyrackError::MalformedRecord("decrypted value is not valid UTF-8".to_string())
        })
    }

    fn sealing_key(&self) -> Result<LessSafeKey, KeyrackError> {
        let unbound = UnboundKey::new(&AES_256_GCM, self.key.as_ref())
            .map_err(|_| KeyrackError::Internal("failed to create AES-256-GCM key".to_string()))?;
        Ok(LessSafeKey::new(unbound))
    }
}

/// Generate a fresh random 256-bit key, hex-encoded for configuration.
pub fn generate_key_hex() -> Result<String, KeyrackError> {
    let rng = SystemRandom::new();
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    rng.fill(key.as_mut())
        .map_err(|_| KeyrackError::Internal("failed to generate random key".to_string()))?;
    Ok(hex::encode(key.as_ref()))
}

fn decode_field(value: &str, field: &str) -> Result<Vec<u8>, KeyrackError> {
    BASE64
        .decode(value)
        .map_err(|_| KeyrackError::MalformedRecord(format!("{field} is not valid base64")))
}
