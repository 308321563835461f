use crate::infrastructure::db::database::DatabaseError;
use crate::infrastructure::db::dto::ApiKeyRow;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyRepositoryError {
    NotFound,
    Conflict,
    StorageUnavailable,
}

impl From<DatabaseError> for ApiKeyRepositoryError {
    fn from(_: DatabaseError) -> Self {
        ApiKeyRepositoryError::StorageUnavailable
    }
}

/// Persistence for issued keys. Every lookup and mutation is scoped to an
/// owner, so a key that belongs to someone else reads as absent.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Fetch an owner's API key by its ID. Returns `None` if it doesn't exist.
    async fn get(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<Option<ApiKeyRow>, ApiKeyRepositoryError>;
    /// Create an API key and return exactly what was stored, including its `seq`.
    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, ApiKeyRepositoryError>;
    /// Set `is_active` on an owner's key and return the stored row. `NotFound` if absent.
    async fn set_active(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
        is_active: bool,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError>;
    /// Hard-delete an owner's key. `NotFound` if absent.
    async fn delete(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<(), ApiKeyRepositoryError>;
    /// All keys of an owner, newest first (`created_at` desc, then `seq` desc).
    async fn list_by_owner(
        &self,
        owner_id: uuid::Uuid,
    ) -> Result<Vec<ApiKeyRow>, ApiKeyRepositoryError>;
    /// Delete `old_key_id` and insert `row` as one atomic step. `NotFound` if
    /// the old key is absent, in which case nothing is inserted.
    async fn replace(
        &self,
        owner_id: uuid::Uuid,
        old_key_id: uuid::Uuid,
        row: &ApiKeyRow,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError>;
}
