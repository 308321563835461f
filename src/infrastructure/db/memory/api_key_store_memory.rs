use crate::infrastructure::db::dto::ApiKeyRow;
use crate::infrastructure::db::stores::api_key_store::{ApiKeyRepositoryError, ApiKeyStore};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    rows: Vec<ApiKeyRow>,
    next_seq: i64,
}

impl State {
    fn position(&self, owner_id: uuid::Uuid, key_id: uuid::Uuid) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.id == key_id && r.owner_id == owner_id)
    }

    fn insert(&mut self, row: &ApiKeyRow) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        if self
            .rows
            .iter()
            .any(|r| r.id == row.id || r.key_hash == row.key_hash)
        {
            return Err(ApiKeyRepositoryError::Conflict);
        }
        self.next_seq += 1;
        let mut stored = row.clone();
        stored.seq = self.next_seq;
        self.rows.push(stored.clone());
        Ok(stored)
    }
}

/// Process-local key store. Each call runs under a single lock, so every
/// operation, `replace` included, is atomic.
#[derive(Default)]
pub struct ApiKeyStoreMemory {
    state: Mutex<State>,
}

impl ApiKeyStoreMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiKeyRepositoryError> {
        self.state
            .lock()
            .map_err(|_| ApiKeyRepositoryError::StorageUnavailable)
    }
}

#[async_trait]
impl ApiKeyStore for ApiKeyStoreMemory {
    async fn get(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<Option<ApiKeyRow>, ApiKeyRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .position(owner_id, key_id)
            .map(|idx| state.rows[idx].clone()))
    }

    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        self.lock()?.insert(row)
    }

    async fn set_active(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
        is_active: bool,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let mut state = self.lock()?;
        let idx = state
            .position(owner_id, key_id)
            .ok_or(ApiKeyRepositoryError::NotFound)?;
        state.rows[idx].is_active = is_active;
        Ok(state.rows[idx].clone())
    }

    async fn delete(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<(), ApiKeyRepositoryError> {
        let mut state = self.lock()?;
        let idx = state
            .position(owner_id, key_id)
            .ok_or(ApiKeyRepositoryError::NotFound)?;
        state.rows.remove(idx);
        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: uuid::Uuid,
    ) -> Result<Vec<ApiKeyRow>, ApiKeyRepositoryError> {
        let state = self.lock()?;
        let mut rows: Vec<ApiKeyRow> = state
            .rows
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(rows)
    }

    async fn replace(
        &self,
        owner_id: uuid::Uuid,
        old_key_id: uuid::Uuid,
        row: &ApiKeyRow,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let mut state = self.lock()?;
        let idx = state
            .position(owner_id, old_key_id)
            .ok_or(ApiKeyRepositoryError::NotFound)?;
        let removed = state.rows.remove(idx);
        match state.insert(row) {
            Ok(stored) => Ok(stored),
            Err(err) => {
                state.rows.insert(idx, removed);
                Err(err)
            }
        }
    }
}
