//! Error types for credvault.
//!
//! Every error variant is a distinct failure mode in the encryption
//! subsystem. Error messages are intentionally minimal — they signal
//! *what* failed without revealing *why* in ways that could leak
//! cryptographic state. In particular, a wrong key, a tampered
//! ciphertext, and a wrong password all surface as the same
//! `DecryptionFailure`.
//!
//! Malformed or legacy record shapes are deliberately *not* errors:
//! decryption resolves them to the empty string for backward
//! compatibility with pre-encryption data. See `crate::decrypt`.

use std::fmt;

/// The single error type for all credvault operations.
#[derive(Debug)]
pub enum CredvaultError {
    /// Encryption failed. The underlying `ring` operation returned an error.
    EncryptionFailure,

    /// Decryption failed. This includes: wrong key, wrong password,
    /// tampered ciphertext, corrupted GCM authentication tag, and
    /// structured records whose decoded nonce/tag/salt have the wrong
    /// length. None of these cases are distinguishable from the outside.
    DecryptionFailure,

    /// A password-based decryption was attempted on a record that carries
    /// no salt, so no key can be derived for it.
    MissingSalt,

    /// The system's random number generator failed to produce bytes.
    RandomnessFailure,
}

impl fmt::Display for CredvaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncryptionFailure => write!(f, "encryption failed"),
            Self::DecryptionFailure => write!(f, "decryption failed"),
            Self::MissingSalt => write!(f, "record carries no salt"),
            Self::RandomnessFailure => write!(f, "randomness source failed"),
        }
    }
}

impl std::error::Error for CredvaultError {}
