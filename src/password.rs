//! Password-based encryption.
//!
//! Composes the KDF and the authenticated cipher for callers that want to
//! encrypt under an arbitrary caller-supplied password rather than the
//! system-wide key. Every encryption generates a fresh random 32-byte salt
//! and attaches it to the record, so two encryptions of the same plaintext
//! under the same password share neither salt, key, nor nonce.
//!
//! A wrong password derives a key that fails GCM tag verification, which
//! surfaces as the same `DecryptionFailure` as a tampered record. The two
//! cases are deliberately indistinguishable from the outside.

use crate::crypto;
use crate::error::CredvaultError;
use crate::keys;
use crate::record::{EncryptedRecord, StoredCredential};

/// Encrypt `plaintext` under a key derived from `password` and a fresh
/// random salt. The salt travels with the record.
pub fn encrypt_with_password(
    plaintext: Option<&str>,
    password: &str,
) -> Result<EncryptedRecord, CredvaultError> {
    let salt = keys::generate_salt()?;
    let key = keys::derive_key(password, &salt);
    let record = crypto::encrypt(plaintext, &key)?;
    Ok(record.with_salt(&salt))
}

/// Decrypt a password-based record.
///
/// Absent, legacy, and malformed inputs behave exactly as in
/// [`crate::decrypt`]. A structured record without a salt cannot have a
/// key derived for it and fails with [`CredvaultError::MissingSalt`].
pub fn decrypt_with_password(
    stored: Option<&StoredCredential>,
    password: &str,
) -> Result<String, CredvaultError> {
    let record = match stored {
        None => return Ok(String::new()),
        Some(StoredCredential::Legacy(plain)) => return Ok(plain.clone()),
        Some(StoredCredential::Other(_)) => return Ok(String::new()),
        Some(StoredCredential::Record(record)) => record,
    };

    let decoded = record.decode()?;
    let salt = decoded.salt.ok_or(CredvaultError::MissingSalt)?;
    let key = keys::derive_key(password, &salt);
    crypto::open(decoded, &key)
}
