//! Value types for API key material.
//!
//! A plaintext key has the shape `wap_` followed by 43 URL-safe base64
//! characters (32 random bytes, unpadded), 47 characters in total. Only the
//! digest and the 8-character prefix of a key are ever persisted.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Scheme tag every issued key starts with.
pub const SCHEME_TAG: &str = "wap_";
/// Random bytes drawn per key (256 bits).
pub const SECRET_ENTROPY_BYTES: usize = 32;
/// Length of the encoded random segment: unpadded base64 of 32 bytes.
pub const SECRET_BODY_LEN: usize = 43;
/// Total length of a plaintext key.
pub const SECRET_LEN: usize = SCHEME_TAG.len() + SECRET_BODY_LEN;
/// Characters of the plaintext kept in clear for identification.
pub const PREFIX_LEN: usize = 8;
/// Hex-encoded SHA-256 length.
pub const DIGEST_HEX_LEN: usize = 64;

/// Returns true if `candidate` has the documented key shape.
///
/// This checks the format only; it says nothing about whether the key was issued.
pub fn looks_like_secret(candidate: &str) -> bool {
    let Some(body) = candidate.strip_prefix(SCHEME_TAG) else {
        return false;
    };
    body.len() == SECRET_BODY_LEN
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The full key text. Exists only in memory, is wiped on drop and never
/// printed through `Debug`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlaintextSecret(String);

impl PlaintextSecret {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the plaintext. Callers must not persist or log it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaintextSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlaintextSecret(<redacted>)")
    }
}

/// Hex SHA-256 of a plaintext key; the only stored form of the secret.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyDigest(String);

impl KeyDigest {
    pub(crate) fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Leading characters of a key, scheme tag included, stored in clear.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    pub(crate) fn from_string(prefix: String) -> Self {
        Self(prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
