use crate::domain::entities::api_key::ApiKeyRecord;
use crate::domain::repositories::api_key_records::{ApiKeyRecords, KeyRecordError};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use crate::infrastructure::db::dto::ApiKeyRow;
use crate::infrastructure::db::stores::api_key_store::{ApiKeyRepositoryError, ApiKeyStore};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ApiKeyRepository {
    store: Arc<dyn ApiKeyStore>,
}

impl ApiKeyRepository {
    /// Build a repository that uses the given store implementation.
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }

    /// Persist a new key and return what was actually stored.
    pub async fn insert(&self, record: &ApiKeyRecord) -> Result<ApiKeyRecord, ApiKeyRepositoryError> {
        let row = ApiKeyRow::from_record(record);
        let stored = self.store.insert(&row).await?;
        Ok(stored.into_record())
    }

    /// Fetch an owner's key by ID. Returns `None` if it doesn't exist.
    pub async fn get(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
    ) -> Result<Option<ApiKeyRecord>, ApiKeyRepositoryError> {
        let row = self.store.get(owner_id.0, key_id.0).await?;
        Ok(row.map(ApiKeyRow::into_record))
    }

    /// Toggle `is_active` and return the stored record.
    pub async fn set_active(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
        is_active: bool,
    ) -> Result<ApiKeyRecord, ApiKeyRepositoryError> {
        let stored = self
            .store
            .set_active(owner_id.0, key_id.0, is_active)
            .await?;
        Ok(stored.into_record())
    }

    /// Delete an owner's key. Returns `NotFound` if it doesn't exist.
    pub async fn delete(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
    ) -> Result<(), ApiKeyRepositoryError> {
        self.store.delete(owner_id.0, key_id.0).await
    }

    /// All keys of an owner, newest first.
    pub async fn list_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> Result<Vec<ApiKeyRecord>, ApiKeyRepositoryError> {
        let rows = self.store.list_by_owner(owner_id.0).await?;
        Ok(rows.into_iter().map(ApiKeyRow::into_record).collect())
    }

    /// Atomically swap `old_key_id` for `replacement`.
    pub async fn replace(
        &self,
        owner_id: OwnerId,
        old_key_id: ApiKeyId,
        replacement: &ApiKeyRecord,
    ) -> Result<ApiKeyRecord, ApiKeyRepositoryError> {
        let row = ApiKeyRow::from_record(replacement);
        let stored = self.store.replace(owner_id.0, old_key_id.0, &row).await?;
        Ok(stored.into_record())
    }
}

impl From<ApiKeyRepositoryError> for KeyRecordError {
    fn from(err: ApiKeyRepositoryError) -> Self {
        match err {
            ApiKeyRepositoryError::NotFound => KeyRecordError::NotFound,
            other => KeyRecordError::Unavailable(format!("{other:?}")),
        }
    }
}

#[async_trait]
impl ApiKeyRecords for ApiKeyRepository {
    async fn insert(&self, record: &ApiKeyRecord) -> Result<ApiKeyRecord, KeyRecordError> {
        Ok(ApiKeyRepository::insert(self, record).await?)
    }

    async fn get(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
    ) -> Result<Option<ApiKeyRecord>, KeyRecordError> {
        Ok(ApiKeyRepository::get(self, owner_id, key_id).await?)
    }

    async fn set_active(
        &self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
        is_active: bool,
    ) -> Result<ApiKeyRecord, KeyRecordError> {
        Ok(ApiKeyRepository::set_active(self, owner_id, key_id, is_active).await?)
    }

    async fn delete(&self, owner_id: OwnerId, key_id: ApiKeyId) -> Result<(), KeyRecordError> {
        Ok(ApiKeyRepository::delete(self, owner_id, key_id).await?)
    }

    async fn list_by_owner(&self, owner_id: OwnerId) -> Result<Vec<ApiKeyRecord>, KeyRecordError> {
        Ok(ApiKeyRepository::list_by_owner(self, owner_id).await?)
    }

    async fn replace(
        &self,
        owner_id: OwnerId,
        old_key_id: ApiKeyId,
        replacement: &ApiKeyRecord,
    ) -> Result<ApiKeyRecord, KeyRecordError> {
        Ok(ApiKeyRepository::replace(self, owner_id, old_key_id, replacement).await?)
    }
}
