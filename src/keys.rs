//! Key material and password-based key derivation.
//!
//! This module owns two responsibilities:
//! 1. Stretching a secret string into a 256-bit key with PBKDF2-HMAC-SHA512
//!    and a caller-supplied salt.
//! 2. Holding key material in a type that is opaque, non-cloneable, and
//!    zeroised on drop.
//!
//! The derivation logic lives here because it operates on the key material
//! itself — not on ciphertexts.
//!
//! ## Derivation structure
//!
//! ```text
//! PBKDF2-HMAC-SHA512(
//!     password   = secret,
//!     salt       = 32 bytes, caller-supplied,
//!     iterations = 100_000,
//!     dk_len     = 32 bytes
//! )
//! ```
//!
//! The iteration count makes each derivation cost tens of milliseconds on
//! purpose, to resist offline brute force against the secret. Callers must
//! not derive more than once per encryption or decryption.

use std::num::NonZeroU32;

use ring::digest;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::KEY_LEN;
use crate::error::CredvaultError;

/// Size of a derivation salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// PBKDF2 iteration count. Fixed for the lifetime of a deployment: data
/// encrypted under a derived key is only decryptable while this constant
/// keeps its value.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// PBKDF2 pseudo-random function: HMAC with a 512-bit hash.
static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA512;

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// A 256-bit symmetric key.
///
/// This is the only form in which keys move through the crate, whether they
/// came from configuration, from PBKDF2, or from the CSPRNG.
///
/// - Not `Clone`. Cannot be duplicated without explicit reconstruction.
/// - Zeroised on drop. Memory is overwritten before deallocation.
/// - Never serialized, logged, or retained beyond the operation using it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_LEN],
}

impl KeyMaterial {
    /// Construct key material from raw bytes.
    ///
    /// Callers normally obtain keys from `resolve_key`, `derive_key`, or
    /// `generate_key` instead; this constructor exists for callers that
    /// already hold provisioned key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Borrow the raw key bytes for use in encrypt/decrypt operations.
    ///
    /// `pub(crate)` — raw bytes never leave the crate.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Stretch `secret` into a 256-bit key under `salt`.
///
/// Purely deterministic: the same `(secret, salt)` pair always yields the
/// same key, across calls and across process restarts. That property is
/// what keeps previously encrypted data decryptable.
pub fn derive_key(secret: &str, salt: &[u8; SALT_LEN]) -> KeyMaterial {
    let iterations =
        NonZeroU32::new(PBKDF2_ITERATIONS).expect("PBKDF2_ITERATIONS is non-zero");

    let mut bytes = [0u8; KEY_LEN];
    pbkdf2::derive(PBKDF2_ALG, iterations, salt, secret.as_bytes(), &mut bytes);

    KeyMaterial { bytes }
}

/// Generate a cryptographically secure random salt.
///
/// Used by the password-based encryption path, which attaches a fresh salt
/// to every record it produces.
pub fn generate_salt() -> Result<[u8; SALT_LEN], CredvaultError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| CredvaultError::RandomnessFailure)?;
    Ok(salt)
}

/// Compute a fixed salt from a constant label.
///
/// The salt is the SHA-256 digest of the label, so the same label always
/// produces the same salt. The key resolver uses this to derive a stable
/// key from a configured secret without having to persist a salt anywhere.
pub(crate) fn fixed_salt(label: &str) -> [u8; SALT_LEN] {
    let digest = digest::digest(&digest::SHA256, label.as_bytes());
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(digest.as_ref());
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let salt = [3u8; SALT_LEN];
        let a = derive_key("a modest secret", &salt);
        let b = derive_key("a modest secret", &salt);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_different_salts_different_keys() {
        let a = derive_key("a modest secret", &[0u8; SALT_LEN]);
        let b = derive_key("a modest secret", &[1u8; SALT_LEN]);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_different_secrets_different_keys() {
        let salt = [3u8; SALT_LEN];
        let a = derive_key("secret-one", &salt);
        let b = derive_key("secret-two", &salt);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_generated_salts_are_unique() {
        let a = generate_salt().unwrap();
        let b = generate_salt().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_salt_is_stable() {
        assert_eq!(fixed_salt("label"), fixed_salt("label"));
        assert_ne!(fixed_salt("label"), fixed_salt("other-label"));
    }
}
