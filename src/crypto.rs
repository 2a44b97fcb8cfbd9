//! The authenticated cipher.
//!
//! All encryption and decryption in the crate goes through the functions
//! exposed here; no other module touches the AEAD primitive.
//!
//! Primitive choices:
//! - **Cipher**: AES-256-GCM (authenticated encryption)
//! - **Nonce**: 96-bit (12 bytes), generated fresh per operation via `SystemRandom`
//! - **Tag**: 128-bit (16 bytes), stored as its own record field
//! - **Key size**: 256 bits (32 bytes)
//!
//! The tag is kept separate from the ciphertext rather than appended to it,
//! so a record's `ct` field is always exactly as long as the plaintext's
//! UTF-8 encoding. Both field lengths are validated before the primitive is
//! invoked: an attacker-supplied record must never reach `ring` with a
//! wrong-length nonce or tag.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::CredvaultError;
use crate::keys::KeyMaterial;
use crate::record::{DecodedRecord, EncryptedRecord, StoredCredential};

/// The AEAD algorithm used throughout credvault.
static ALGORITHM: &ring::aead::Algorithm = &AES_256_GCM;

/// Identifier written into every record's `enc` field. One supported value
/// for the lifetime of a deployment.
pub const ALGORITHM_ID: &str = "aes-256-gcm";

/// Size of the nonce in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// Size of a symmetric key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Generate a cryptographically secure random nonce.
///
/// A fresh nonce is generated for every encryption call. There is no nonce
/// caching or counter-based generation: nonce uniqueness under a given key
/// rests entirely on the CSPRNG.
fn generate_nonce() -> Result<[u8; NONCE_LEN], CredvaultError> {
    let rng = SystemRandom::new();
    let mut buf = [0u8; NONCE_LEN];
    rng.fill(&mut buf)
        .map_err(|_| CredvaultError::RandomnessFailure)?;
    Ok(buf)
}

/// Encrypt a plaintext string under `key`, producing a transportable record.
///
/// An absent plaintext is treated as the empty string, so credential
/// fields that were never set still produce a well-formed record. No associated
/// data is used. Nothing about the plaintext or key is logged.
pub fn encrypt(
    plaintext: Option<&str>,
    key: &KeyMaterial,
) -> Result<EncryptedRecord, CredvaultError> {
    let plaintext = plaintext.unwrap_or("");

    let unbound = UnboundKey::new(ALGORITHM, key.as_bytes())
        .map_err(|_| CredvaultError::EncryptionFailure)?;
    let sealing = LessSafeKey::new(unbound);

    let nonce_bytes = generate_nonce()?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // `seal_in_place_separate_tag` encrypts in place and hands back the GCM
    // tag on its own, which is exactly the record layout.
    let mut in_out = plaintext.as_bytes().to_vec();
    let tag = sealing
        .seal_in_place_separate_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CredvaultError::EncryptionFailure)?;

    Ok(EncryptedRecord::new(&nonce_bytes, tag.as_ref(), &in_out))
}

/// Decrypt a stored credential back to its plaintext string.
///
/// The input mirrors what the repository layer actually holds:
/// - `None`: no value was ever stored; resolves to the empty string.
/// - a legacy plain string: pre-encryption data, returned unchanged.
/// - any other JSON shape: malformed legacy data, resolves to the empty
///   string rather than failing the whole read.
/// - a structured record: decoded, validated, and authenticated. Tag
///   verification failure (tampering, wrong key, corruption) is a
///   `DecryptionFailure` and always propagates; garbage plaintext is never
///   returned silently.
pub fn decrypt(
    stored: Option<&StoredCredential>,
    key: &KeyMaterial,
) -> Result<String, CredvaultError> {
    let record = match stored {
        None => return Ok(String::new()),
        Some(StoredCredential::Legacy(plain)) => return Ok(plain.clone()),
        Some(StoredCredential::Other(_)) => return Ok(String::new()),
        Some(StoredCredential::Record(record)) => record,
    };

    open(record.decode()?, key)
}

/// Run AES-256-GCM over an already decoded and length-validated record.
///
/// `pub(crate)` — the password-based path decodes the record itself (it
/// needs the salt before it can derive a key) and then comes through here.
pub(crate) fn open(
    decoded: DecodedRecord,
    key: &KeyMaterial,
) -> Result<String, CredvaultError> {
    let unbound = UnboundKey::new(ALGORITHM, key.as_bytes())
        .map_err(|_| CredvaultError::DecryptionFailure)?;
    let opening = LessSafeKey::new(unbound);

    let nonce = Nonce::assume_unique_for_key(decoded.nonce);

    // `ring` expects the tag appended to the ciphertext for opening.
    let mut in_out = decoded.ciphertext;
    in_out.extend_from_slice(&decoded.tag);

    let plaintext = opening
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CredvaultError::DecryptionFailure)?;

    String::from_utf8(plaintext.to_vec()).map_err(|_| CredvaultError::DecryptionFailure)
}

/// Generate a cryptographically secure random key.
///
/// This is the only function in the crate that produces raw key material
/// from scratch. It is used by `generate_key()` in the public API.
pub fn generate_random_key() -> Result<[u8; KEY_LEN], CredvaultError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; KEY_LEN];
    rng.fill(&mut key)
        .map_err(|_| CredvaultError::RandomnessFailure)?;
    Ok(key)
}
