use crate::domain::value_objects::secret::{PlaintextSecret, SCHEME_TAG, SECRET_ENTROPY_BYTES};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::Zeroize;

/// The operating system's secure random source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropySourceUnavailable(pub String);

/// Produces fresh plaintext keys.
pub trait SecretGenerator: Send + Sync {
    fn generate(&self) -> Result<PlaintextSecret, EntropySourceUnavailable>;
}

/// Draws key material from the OS CSPRNG. There is no fallback source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretGenerator;

impl SecretGenerator for OsSecretGenerator {
    fn generate(&self) -> Result<PlaintextSecret, EntropySourceUnavailable> {
        // Step 1: Fill the buffer from the OS; a failed read aborts the key.
        let mut bytes = [0u8; SECRET_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropySourceUnavailable(e.to_string()))?;

        // Step 2: Encode as URL-safe text behind the scheme tag.
        let mut body = URL_SAFE_NO_PAD.encode(bytes);
        let secret = PlaintextSecret::new(format!("{SCHEME_TAG}{body}"));

        // Step 3: Wipe the intermediates.
        bytes.zeroize();
        body.zeroize();

        Ok(secret)
    }
}
