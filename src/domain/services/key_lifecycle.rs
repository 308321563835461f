use crate::domain::entities::api_key::{ApiKeyRecord, KeyName, KeyNameError};
use crate::domain::repositories::api_key_records::{ApiKeyRecords, KeyRecordError};
use crate::domain::services::key_digest;
use crate::domain::services::secret_generator::{EntropySourceUnavailable, SecretGenerator};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use crate::domain::value_objects::secret::PlaintextSecret;
use async_trait::async_trait;
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyLifecycleError {
    #[error("no authenticated owner")]
    NotAuthenticated,
    #[error("invalid key name: {0}")]
    InvalidName(#[from] KeyNameError),
    #[error("api key not found")]
    NotFound,
    #[error(transparent)]
    EntropySourceUnavailable(#[from] EntropySourceUnavailable),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<KeyRecordError> for KeyLifecycleError {
    fn from(err: KeyRecordError) -> Self {
        match err {
            KeyRecordError::NotFound => KeyLifecycleError::NotFound,
            KeyRecordError::Unavailable(detail) => KeyLifecycleError::Persistence(detail),
        }
    }
}

/// Issue, list, toggle, rotate and delete an owner's API keys.
///
/// The plaintext of a key leaves this service exactly once, in the return
/// value of `create` or `rotate`; only its digest and prefix are stored.
#[async_trait]
pub trait KeyLifecycleService: Send + Sync {
    async fn create(
        &self,
        owner: Option<OwnerId>,
        key_name: &str,
    ) -> Result<(ApiKeyRecord, PlaintextSecret), KeyLifecycleError>;

    async fn list(&self, owner: Option<OwnerId>) -> Result<Vec<ApiKeyRecord>, KeyLifecycleError>;

    async fn set_active(
        &self,
        owner: Option<OwnerId>,
        key_id: ApiKeyId,
        is_active: bool,
    ) -> Result<ApiKeyRecord, KeyLifecycleError>;

    async fn delete(&self, owner: Option<OwnerId>, key_id: ApiKeyId)
    -> Result<(), KeyLifecycleError>;

    /// Replace a key with a freshly generated one under the same name.
    async fn rotate(
        &self,
        owner: Option<OwnerId>,
        key_id: ApiKeyId,
    ) -> Result<(ApiKeyRecord, PlaintextSecret), KeyLifecycleError>;
}

pub struct KeyLifecycle {
    repo: Arc<dyn ApiKeyRecords>,
    generator: Arc<dyn SecretGenerator>,
}

impl KeyLifecycle {
    pub fn new(repo: Arc<dyn ApiKeyRecords>, generator: Arc<dyn SecretGenerator>) -> Self {
        Self { repo, generator }
    }

    fn require_owner(owner: Option<OwnerId>) -> Result<OwnerId, KeyLifecycleError> {
        owner.ok_or(KeyLifecycleError::NotAuthenticated)
    }

    /// Generate a key and the record that describes it, without persisting.
    fn mint(
        &self,
        owner_id: OwnerId,
        key_name: KeyName,
    ) -> Result<(ApiKeyRecord, PlaintextSecret), KeyLifecycleError> {
        let secret = self.generator.generate().inspect_err(|e| {
            counter!("api_key_create_failures_total", "reason" => "entropy").increment(1);
            warn!(owner_id = %owner_id, error = %e, "api_key_entropy_unavailable");
        })?;
        let record = ApiKeyRecord::issue(
            owner_id,
            key_name,
            key_digest::digest(&secret),
            key_digest::prefix_of(&secret),
        );
        Ok((record, secret))
    }
}

fn storage_failure(owner_id: OwnerId, err: KeyRecordError) -> KeyLifecycleError {
    counter!("api_key_create_failures_total", "reason" => "storage").increment(1);
    warn!(owner_id = %owner_id, error = %err, "api_key_store_failed");
    KeyLifecycleError::from(err)
}

#[async_trait]
impl KeyLifecycleService for KeyLifecycle {
    async fn create(
        &self,
        owner: Option<OwnerId>,
        key_name: &str,
    ) -> Result<(ApiKeyRecord, PlaintextSecret), KeyLifecycleError> {
        // Step 1: Require an identity and a usable name.
        let owner_id = Self::require_owner(owner)?;
        let key_name = KeyName::parse(key_name)?;

        // Step 2: Generate the key, its digest and prefix.
        let (record, secret) = self.mint(owner_id, key_name)?;

        // Step 3: Persist digest + prefix; on failure the plaintext is dropped here.
        let stored = self
            .repo
            .insert(&record)
            .await
            .map_err(|e| storage_failure(owner_id, e))?;

        counter!("api_keys_created_total").increment(1);
        info!(
            owner_id = %owner_id,
            key_id = %stored.id,
            key_prefix = stored.prefix.as_str(),
            "api_key_created"
        );

        // Step 4: Hand the plaintext to the caller, once.
        Ok((stored, secret))
    }

    async fn list(&self, owner: Option<OwnerId>) -> Result<Vec<ApiKeyRecord>, KeyLifecycleError> {
        let owner_id = Self::require_owner(owner)?;
        Ok(self.repo.list_by_owner(owner_id).await?)
    }

    async fn set_active(
        &self,
        owner: Option<OwnerId>,
        key_id: ApiKeyId,
        is_active: bool,
    ) -> Result<ApiKeyRecord, KeyLifecycleError> {
        let owner_id = Self::require_owner(owner)?;
        let stored = self.repo.set_active(owner_id, key_id, is_active).await?;
        info!(owner_id = %owner_id, key_id = %key_id, is_active, "api_key_toggled");
        Ok(stored)
    }

    async fn delete(
        &self,
        owner: Option<OwnerId>,
        key_id: ApiKeyId,
    ) -> Result<(), KeyLifecycleError> {
        let owner_id = Self::require_owner(owner)?;
        self.repo.delete(owner_id, key_id).await?;
        counter!("api_keys_deleted_total").increment(1);
        info!(owner_id = %owner_id, key_id = %key_id, "api_key_deleted");
        Ok(())
    }

    async fn rotate(
        &self,
        owner: Option<OwnerId>,
        key_id: ApiKeyId,
    ) -> Result<(ApiKeyRecord, PlaintextSecret), KeyLifecycleError> {
        // Step 1: Load the key being replaced (must exist for this owner).
        let owner_id = Self::require_owner(owner)?;
        let Some(existing) = self.repo.get(owner_id, key_id).await? else {
            return Err(KeyLifecycleError::NotFound);
        };

        // Step 2: Mint the replacement under the same name.
        let key_name = KeyName::parse(&existing.key_name)?;
        let (record, secret) = self.mint(owner_id, key_name)?;

        // Step 3: Delete + insert atomically.
        let stored = self
            .repo
            .replace(owner_id, key_id, &record)
            .await
            .map_err(|e| match e {
                KeyRecordError::NotFound => KeyLifecycleError::NotFound,
                other => storage_failure(owner_id, other),
            })?;

        counter!("api_keys_created_total").increment(1);
        counter!("api_keys_deleted_total").increment(1);
        info!(
            owner_id = %owner_id,
            old_key_id = %key_id,
            key_id = %stored.id,
            key_prefix = stored.prefix.as_str(),
            "api_key_rotated"
        );

        Ok((stored, secret))
    }
}
