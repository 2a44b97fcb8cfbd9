//! # credvault
//!
//! Authenticated encryption at rest for stored credentials.
//!
//! Credential values are encrypted per record with AES-256-GCM under a key
//! resolved from deployment configuration (an explicit 32-byte key, a
//! stretched secret, or a development default), or under a key derived
//! from a caller-supplied password with a per-record salt. Decryption
//! verifies the GCM authentication tag and fails loudly on tampering,
//! while degrading gracefully on legacy plaintext and malformed records.
//!
//! ## Public API
//!
//! The public surface of this crate is intentionally narrow: the
//! encrypt/decrypt pair, the password-based pair, key resolution and
//! derivation, record types, the constant-time comparator, and
//! [`generate_key`] for provisioning. Raw key bytes never leave the crate.

// Module declarations.
pub mod compare;
pub(crate) mod crypto;
pub mod error;
pub mod keys;
pub mod password;
pub mod record;
pub mod resolver;

pub use compare::secure_compare;
pub use crypto::{decrypt, encrypt, ALGORITHM_ID, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use error::CredvaultError;
pub use keys::{derive_key, KeyMaterial, PBKDF2_ITERATIONS, SALT_LEN};
pub use password::{decrypt_with_password, encrypt_with_password};
pub use record::{EncryptedRecord, StoredCredential};
pub use resolver::{resolve_key, KeyConfig};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Generate a fresh base64-encoded 256-bit key.
///
/// This is the provisioning entry point: run it once out-of-band and place
/// the output in the deployment's key configuration (see
/// [`resolver::ENV_ENCRYPTION_KEY`]). The encoded form is exactly what the
/// key resolver's highest-precedence strategy consumes.
pub fn generate_key() -> Result<String, CredvaultError> {
    let bytes = crypto::generate_random_key()?;
    Ok(BASE64.encode(bytes))
}
