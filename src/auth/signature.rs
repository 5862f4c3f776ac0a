//! HMAC-SHA256 webhook signatures.
//!
//! # Data Flow
//! ```text
//! version, timestamp header, canonical path, raw body
//!     → SignedMessage ("v1:1700000000:/content/resources/find:{...}")
//!     → HMAC-SHA256 under the shared secret
//!     → lowercase hex
//!     → constant-time compare against each presented token
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Protocol literal prefixed to every signed message.
pub const SIGNATURE_VERSION: &str = "v1";

/// Errors raised while loading the shared secret.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret is empty")]
    Empty,

    #[error("secret is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("secret cannot key HMAC-SHA256")]
    InvalidKey,
}

/// Shared signing key, decoded once and keyed into an HMAC instance.
#[derive(Clone)]
pub struct Secret {
    keyed: HmacSha256,
}

impl Secret {
    /// Decode a base64 secret as provided by the calling platform.
    pub fn from_base64(encoded: &str) -> Result<Self, SecretError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(SecretError::Empty);
        }
        let key = STANDARD.decode(encoded)?;
        Self::from_bytes(&key)
    }

    pub fn from_bytes(key: &[u8]) -> Result<Self, SecretError> {
        if key.is_empty() {
            return Err(SecretError::Empty);
        }
        let keyed = HmacSha256::new_from_slice(key).map_err(|_| SecretError::InvalidKey)?;
        Ok(Self { keyed })
    }

    /// Lowercase hex HMAC-SHA256 of `message`.
    pub fn sign(&self, message: &SignedMessage) -> String {
        let mut mac = self.keyed.clone();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// The exact byte string the platform signs:
/// `{version}:{timestamp}:{canonical_path}:{raw_body}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    bytes: Vec<u8>,
}

impl SignedMessage {
    /// `timestamp` is the header value as received, never re-formatted.
    pub fn new(version: &str, timestamp: &str, canonical_path: &str, raw_body: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(
            version.len() + timestamp.len() + canonical_path.len() + raw_body.len() + 3,
        );
        bytes.extend_from_slice(version.as_bytes());
        bytes.push(b':');
        bytes.extend_from_slice(timestamp.as_bytes());
        bytes.push(b':');
        bytes.extend_from_slice(canonical_path.as_bytes());
        bytes.push(b':');
        bytes.extend_from_slice(raw_body);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Split a signatures header into candidate tokens.
///
/// Tokens are separated by commas and/or ASCII whitespace.
pub fn signature_tokens(presented: &str) -> impl Iterator<Item = &str> {
    presented
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

/// Check `presented` against the expected signature for `message`.
///
/// Every token is compared in constant time and the results are folded
/// without short-circuiting. A token only matches when it is exactly the
/// expected digest.
pub fn verify_signature(secret: &Secret, message: &SignedMessage, presented: &str) -> bool {
    let expected = secret.sign(message);

    let mut matched = Choice::from(0);
    for token in signature_tokens(presented) {
        matched |= token.as_bytes().ct_eq(expected.as_bytes());
    }
    matched.into()
}
