//! One-way digest and display prefix of a plaintext key.
//!
//! Both functions are pure: the same plaintext always yields byte-identical
//! output, which is what lets a verification path recompute and compare.

use crate::domain::value_objects::secret::{KeyDigest, KeyPrefix, PREFIX_LEN, PlaintextSecret};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// SHA-256 of the full plaintext, lowercase hex.
pub fn digest(secret: &PlaintextSecret) -> KeyDigest {
    digest_str(secret.expose())
}

/// The first `PREFIX_LEN` characters of the plaintext, scheme tag included.
pub fn prefix_of(secret: &PlaintextSecret) -> KeyPrefix {
    KeyPrefix::from_string(secret.expose().chars().take(PREFIX_LEN).collect())
}

/// Recompute the digest of a presented key and compare it to a stored one in
/// constant time.
pub fn matches(candidate: &str, stored: &KeyDigest) -> bool {
    let computed = digest_str(candidate);
    computed
        .as_str()
        .as_bytes()
        .ct_eq(stored.as_str().as_bytes())
        .into()
}

fn digest_str(raw: &str) -> KeyDigest {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    KeyDigest::from_hex(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::secret_generator::{OsSecretGenerator, SecretGenerator};
    use crate::domain::value_objects::secret::{DIGEST_HEX_LEN, SCHEME_TAG};

    fn fresh() -> PlaintextSecret {
        OsSecretGenerator.generate().unwrap()
    }

    #[test]
    fn given_same_secret_when_digested_twice_should_be_identical() {
        let secret = fresh();
        assert_eq!(digest(&secret), digest(&secret));
        assert_eq!(prefix_of(&secret), prefix_of(&secret));
    }

    #[test]
    fn given_known_input_when_digested_should_match_sha256_vector() {
        let secret = PlaintextSecret::new("abc".to_string());
        assert_eq!(
            digest(&secret).as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn given_secret_when_digested_should_be_fixed_length_hex_without_plaintext() {
        for _ in 0..100 {
            let secret = fresh();
            let d = digest(&secret);

            assert_eq!(d.as_str().len(), DIGEST_HEX_LEN);
            assert!(d.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
            assert!(!d.as_str().contains(&secret.expose()[SCHEME_TAG.len()..]));
        }
    }

    #[test]
    fn given_secret_when_prefix_of_should_be_literal_prefix_including_tag() {
        for _ in 0..100 {
            let secret = fresh();
            let prefix = prefix_of(&secret);

            assert_eq!(prefix.as_str().len(), PREFIX_LEN);
            assert!(prefix.as_str().starts_with(SCHEME_TAG));
            assert!(secret.expose().starts_with(prefix.as_str()));
        }
    }

    #[test]
    fn given_distinct_secrets_when_digested_should_differ() {
        assert_ne!(digest(&fresh()), digest(&fresh()));
    }

    #[test]
    fn given_original_key_when_matches_should_accept() {
        let secret = fresh();
        let stored = digest(&secret);
        assert!(matches(secret.expose(), &stored));
    }

    #[test]
    fn given_other_key_or_prefix_when_matches_should_reject() {
        let secret = fresh();
        let stored = digest(&secret);

        assert!(!matches(fresh().expose(), &stored));
        assert!(!matches(prefix_of(&secret).as_str(), &stored));
        assert!(!matches("", &stored));
    }
}
