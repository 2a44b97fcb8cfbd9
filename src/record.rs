//! The transportable encrypted record and the stored-credential union.
//!
//! `EncryptedRecord` is the only entity this crate persists or transports.
//! Its byte fields are carried base64-encoded, matching the shape the
//! repository layer writes into the document store:
//!
//! ```json
//! {
//!   "enc":  "aes-256-gcm",
//!   "iv":   "<base64, 12 raw bytes>",
//!   "tag":  "<base64, 16 raw bytes>",
//!   "ct":   "<base64, N raw bytes>",
//!   "salt": "<base64, 32 raw bytes>"
//! }
//! ```
//!
//! `salt` is present if and only if the record was produced by the
//! password-based path. Records are immutable once produced: updating a
//! stored credential means producing a brand-new record.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::crypto::{ALGORITHM_ID, NONCE_LEN, TAG_LEN};
use crate::error::CredvaultError;
use crate::keys::SALT_LEN;

/// A single encrypted credential value, ready for storage or transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptedRecord {
    /// Cipher identifier. Always [`ALGORITHM_ID`] for records this crate
    /// produces; anything else is rejected on decode.
    pub enc: String,
    /// Base64 of the 12-byte nonce.
    pub iv: String,
    /// Base64 of the 16-byte GCM authentication tag.
    pub tag: String,
    /// Base64 of the ciphertext. Same length as the plaintext's UTF-8
    /// encoding once decoded; the tag is not appended here.
    pub ct: String,
    /// Base64 of the 32-byte derivation salt. Present only for records
    /// produced by the password-based path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

/// What the repository layer may hand back for a credential field.
///
/// Stored values predating the encryption rollout are plain JSON strings;
/// everything since is a structured record. Any other shape is malformed
/// legacy data. Decryption pattern-matches on this tag instead of
/// inspecting the value at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredCredential {
    /// A structured encrypted record.
    Record(EncryptedRecord),
    /// A legacy plaintext value from before encryption at rest existed.
    Legacy(String),
    /// Anything else, e.g. an object missing required fields. Decryption
    /// resolves these to the empty string rather than failing the read.
    Other(serde_json::Value),
}

/// A record's byte fields, decoded and length-validated.
///
/// Constructing this is the only way into the cipher: wrong-length nonces,
/// tags, and salts are rejected here, before `ring` ever sees them.
pub(crate) struct DecodedRecord {
    pub(crate) nonce: [u8; NONCE_LEN],
    pub(crate) tag: [u8; TAG_LEN],
    pub(crate) ciphertext: Vec<u8>,
    pub(crate) salt: Option<[u8; SALT_LEN]>,
}

impl EncryptedRecord {
    /// Assemble a record from freshly produced cipher output. No salt; the
    /// password-based path attaches one via [`EncryptedRecord::with_salt`].
    pub(crate) fn new(nonce: &[u8; NONCE_LEN], tag: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            enc: ALGORITHM_ID.to_string(),
            iv: BASE64.encode(nonce),
            tag: BASE64.encode(tag),
            ct: BASE64.encode(ciphertext),
            salt: None,
        }
    }

    /// Attach a derivation salt, marking this as a password-based record.
    pub(crate) fn with_salt(mut self, salt: &[u8; SALT_LEN]) -> Self {
        self.salt = Some(BASE64.encode(salt));
        self
    }

    /// Decode and validate every byte field.
    ///
    /// A record that reaches this point committed to the structured shape,
    /// so any undecodable field, wrong decoded length, or unrecognized
    /// cipher identifier is a [`CredvaultError::DecryptionFailure`], not a
    /// silent empty-string degradation.
    pub(crate) fn decode(&self) -> Result<DecodedRecord, CredvaultError> {
        if self.enc != ALGORITHM_ID {
            return Err(CredvaultError::DecryptionFailure);
        }

        let nonce = decode_exact::<NONCE_LEN>(&self.iv)?;
        let tag = decode_exact::<TAG_LEN>(&self.tag)?;
        let ciphertext = BASE64
            .decode(&self.ct)
            .map_err(|_| CredvaultError::DecryptionFailure)?;
        let salt = match &self.salt {
            Some(encoded) => Some(decode_exact::<SALT_LEN>(encoded)?),
            None => None,
        };

        Ok(DecodedRecord {
            nonce,
            tag,
            ciphertext,
            salt,
        })
    }
}

/// Base64-decode a field that must decode to exactly `N` bytes.
fn decode_exact<const N: usize>(encoded: &str) -> Result<[u8; N], CredvaultError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| CredvaultError::DecryptionFailure)?;
    bytes
        .try_into()
        .map_err(|_| CredvaultError::DecryptionFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_as_record_variant() {
        let json = r#"{"enc":"aes-256-gcm","iv":"AAAAAAAAAAAAAAAA","tag":"AAAAAAAAAAAAAAAAAAAAAA==","ct":"AAAA"}"#;
        let stored: StoredCredential = serde_json::from_str(json).unwrap();
        assert!(matches!(stored, StoredCredential::Record(_)));
    }

    #[test]
    fn test_plain_string_parses_as_legacy_variant() {
        let stored: StoredCredential =
            serde_json::from_str(r#""legacy-plaintext-password""#).unwrap();
        match stored {
            StoredCredential::Legacy(value) => assert_eq!(value, "legacy-plaintext-password"),
            other => panic!("expected legacy variant, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_object_parses_as_other_variant() {
        // Missing `ct` — not a valid record, not a string either.
        let json = r#"{"enc":"aes-256-gcm","iv":"AAAAAAAAAAAAAAAA"}"#;
        let stored: StoredCredential = serde_json::from_str(json).unwrap();
        assert!(matches!(stored, StoredCredential::Other(_)));
    }

    #[test]
    fn test_salt_is_omitted_from_serialization_when_absent() {
        let record = EncryptedRecord::new(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"ct");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("salt"));
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let record =
            EncryptedRecord::new(&[7u8; NONCE_LEN], &[9u8; TAG_LEN], b"bytes").with_salt(&[1u8; SALT_LEN]);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: EncryptedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_decode_rejects_wrong_nonce_length() {
        let mut record = EncryptedRecord::new(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"ct");
        record.iv = BASE64.encode([0u8; NONCE_LEN - 1]);
        assert!(record.decode().is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_tag_length() {
        let mut record = EncryptedRecord::new(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"ct");
        record.tag = BASE64.encode([0u8; TAG_LEN + 1]);
        assert!(record.decode().is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_cipher_identifier() {
        let mut record = EncryptedRecord::new(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"ct");
        record.enc = "aes-128-cbc".to_string();
        assert!(record.decode().is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let mut record = EncryptedRecord::new(&[0u8; NONCE_LEN], &[0u8; TAG_LEN], b"ct");
        record.ct = "not base64!!".to_string();
        assert!(record.decode().is_err());
    }
}
