use crate::domain::entities::api_key::{ApiKeyRecord, KeyNameError};
use crate::domain::services::disclosure::{DisclosureController, DisclosureError};
use crate::domain::services::key_lifecycle::KeyLifecycleError;
use crate::domain::value_objects::ids::ApiKeyId;
use crate::domain::value_objects::secret::PlaintextSecret;
use thiserror::Error;

/// A stored key as a session sees it.
#[derive(Debug, Clone)]
pub struct ApiKeyView {
    pub record: ApiKeyRecord,
    /// Plaintext while revealed in this session, otherwise the masked prefix.
    pub display: String,
    /// Whether this session still holds the plaintext.
    pub revealable: bool,
}

impl ApiKeyView {
    pub fn from_session(record: ApiKeyRecord, disclosure: &DisclosureController) -> Self {
        let display = disclosure.display(&record);
        let revealable = disclosure.held_key_id() == Some(record.id);
        Self {
            record,
            display,
            revealable,
        }
    }
}

#[derive(Debug)]
pub struct RevealedApiKey {
    pub key_id: ApiKeyId,
    pub api_key: PlaintextSecret,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiKeyUseCaseError {
    #[error("no authenticated owner")]
    NotAuthenticated,
    #[error("invalid key name: {0}")]
    InvalidName(KeyNameError),
    #[error("api key not found")]
    NotFound,
    #[error("no plaintext is held for this key")]
    NothingToReveal,
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<KeyLifecycleError> for ApiKeyUseCaseError {
    fn from(err: KeyLifecycleError) -> Self {
        match err {
            KeyLifecycleError::NotAuthenticated => ApiKeyUseCaseError::NotAuthenticated,
            KeyLifecycleError::InvalidName(e) => ApiKeyUseCaseError::InvalidName(e),
            KeyLifecycleError::NotFound => ApiKeyUseCaseError::NotFound,
            KeyLifecycleError::EntropySourceUnavailable(e) => {
                ApiKeyUseCaseError::EntropyUnavailable(e.0)
            }
            KeyLifecycleError::Persistence(e) => ApiKeyUseCaseError::Storage(e),
        }
    }
}

impl From<DisclosureError> for ApiKeyUseCaseError {
    fn from(err: DisclosureError) -> Self {
        match err {
            DisclosureError::NothingToReveal => ApiKeyUseCaseError::NothingToReveal,
        }
    }
}
