//! Key resolution from deployment configuration.
//!
//! The resolver turns whatever key material a deployment actually
//! configured into a usable 256-bit key. Resolution walks an explicit
//! ordered list of strategies and takes the first that yields a key: no
//! exception-driven fallback chains, no hidden global state. Configuration
//! is an explicit [`KeyConfig`] value so tests can inject fixtures;
//! production callers build one with [`KeyConfig::from_env`].
//!
//! Precedence:
//! 1. an explicitly configured base64-encoded 32-byte key,
//! 2. a configured secret of at least 8 characters, stretched with a fixed
//!    deterministic salt so the same secret yields the same key across
//!    process restarts,
//! 3. a hard-coded insecure default, for development only.
//!
//! The resolver never fails: a misconfigured deployment gets a warning
//! diagnostic and the next strategy, not an error. Getting the
//! configuration right is the operator's responsibility.

use std::env;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::crypto::KEY_LEN;
use crate::keys::{self, KeyMaterial};

/// Environment variable holding a base64-encoded 32-byte key.
pub const ENV_ENCRYPTION_KEY: &str = "CREDVAULT_ENCRYPTION_KEY";

/// Environment variable holding a secret string (≥ 8 characters).
pub const ENV_SECRET: &str = "CREDVAULT_SECRET";

/// Minimum length, in characters, for a configured secret to be accepted.
const MIN_SECRET_CHARS: usize = 8;

/// Label hashed into the fixed salt used when deriving from a configured
/// secret. Changing this value orphans all data encrypted under a
/// secret-derived key.
const RESOLVER_SALT_LABEL: &str = "credvault.secret-derivation.v1";

/// Development-only fallback secret, used when nothing is configured.
const INSECURE_DEFAULT_SECRET: &str = "credvault-insecure-default-secret";

/// Key-related configuration, read once and passed in explicitly.
#[derive(Debug, Clone, Default)]
pub struct KeyConfig {
    /// Base64 encoding of a 32-byte key. Highest precedence.
    pub encoded_key: Option<String>,
    /// Secret string to stretch into a key. Used when no valid explicit
    /// key is configured.
    pub secret: Option<String>,
}

impl KeyConfig {
    /// Read the configuration from the process environment. Empty values
    /// are treated as absent.
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            encoded_key: read(ENV_ENCRYPTION_KEY),
            secret: read(ENV_SECRET),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution strategies
// ---------------------------------------------------------------------------

/// The ordered strategies tried before falling back to the insecure
/// default. Each returns `None` to pass resolution to the next entry.
const STRATEGIES: &[(&str, fn(&KeyConfig) -> Option<KeyMaterial>)] = &[
    ("configured-key", from_configured_key),
    ("derived-secret", from_configured_secret),
];

/// Resolve the key used for default (non-password) encryption.
///
/// Always returns a usable key; see the module docs for precedence. Safe to
/// call concurrently — resolution is a pure read of `config`.
pub fn resolve_key(config: &KeyConfig) -> KeyMaterial {
    for (name, strategy) in STRATEGIES {
        if let Some(key) = strategy(config) {
            tracing::debug!(strategy = *name, "resolved encryption key");
            return key;
        }
    }

    tracing::warn!(
        "no usable encryption key or secret configured; deriving from the built-in \
         insecure default; this must never be used in production"
    );
    keys::derive_key(
        INSECURE_DEFAULT_SECRET,
        &keys::fixed_salt(RESOLVER_SALT_LABEL),
    )
}

/// Strategy 1: decode an explicitly configured base64 key.
fn from_configured_key(config: &KeyConfig) -> Option<KeyMaterial> {
    let encoded = config.encoded_key.as_deref()?;

    let decoded = match BASE64.decode(encoded) {
        Ok(decoded) => decoded,
        Err(_) => {
            tracing::warn!("configured encryption key is not valid base64; falling back");
            return None;
        }
    };

    let bytes: [u8; KEY_LEN] = match decoded.try_into() {
        Ok(bytes) => bytes,
        Err(decoded) => {
            tracing::warn!(
                decoded_len = decoded.len(),
                "configured encryption key does not decode to 32 bytes; falling back"
            );
            return None;
        }
    };

    Some(KeyMaterial::from_bytes(bytes))
}

/// Strategy 2: stretch a configured secret with the fixed deterministic salt.
fn from_configured_secret(config: &KeyConfig) -> Option<KeyMaterial> {
    let secret = config.secret.as_deref()?;

    if secret.chars().count() < MIN_SECRET_CHARS {
        tracing::warn!(
            min_chars = MIN_SECRET_CHARS,
            "configured secret is too short; falling back"
        );
        return None;
    }

    Some(keys::derive_key(
        secret,
        &keys::fixed_salt(RESOLVER_SALT_LABEL),
    ))
}
