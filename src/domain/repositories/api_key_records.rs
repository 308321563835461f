use crate::domain::entities::api_key::ApiKeyRecord;
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyRecordError {
    #[error("api key not found")]
    NotFound,
    #[error("key store unavailable: {0}")]
    Unavailable(String),
}

/// Owner-scoped access to stored key records. Implementations never see plaintext.
#[async_trait]
pub trait ApiKeyRecords: Send + Sync {
    async fn insert(&self, record: &ApiKeyRecord) -> Result<ApiKeyRecord, KeyRecordError>;

    async fn get(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
    ) -> Result<Option<ApiKeyRecord>, KeyRecordError>;

    async fn set_active(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
        is_active: bool,
    ) -> Result<ApiKeyRecord, KeyRecordError>;

    async fn delete(&self, owner_id: OwnerId, key_id: ApiKeyId) -> Result<(), KeyRecordError>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<ApiKeyRecord>, KeyRecordError>;

    /// Delete `old_key_id` and insert `replacement` as one unit.
    async fn replace(
        &self,
        owner_id: OwnerId,
        old_key_id: ApiKeyId,
        replacement: &ApiKeyRecord,
    ) -> Result<ApiKeyRecord, KeyRecordError>;
}
