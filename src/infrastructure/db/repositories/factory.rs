use std::sync::Arc;

use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::memory::ApiKeyStoreMemory;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::api_key_store_postgres::ApiKeyStorePostgres;
use crate::infrastructure::db::repositories::api_key_repository::ApiKeyRepository;

#[derive(Clone)]
pub struct Repositories {
    pub db: Option<Arc<PostgresDatabase>>,
    pub api_key: Arc<ApiKeyRepository>,
}

impl Repositories {
    /// Build all repositories backed by Postgres stores.
    pub fn postgres(db: Arc<PostgresDatabase>) -> Self {
        let api_key_store = Arc::new(ApiKeyStorePostgres::new(db.clone()));

        Self {
            db: Some(db),
            api_key: Arc::new(ApiKeyRepository::new(api_key_store)),
        }
    }

    /// Build all repositories backed by process-local stores.
    pub fn in_memory() -> Self {
        Self {
            db: None,
            api_key: Arc::new(ApiKeyRepository::new(Arc::new(ApiKeyStoreMemory::new()))),
        }
    }

    /// Check that the backing database answers. Always ready without one.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let Some(db) = self.db.as_ref() else {
            return Ok(());
        };
        db.execute("SELECT 1").await.map(|_| ())
    }
}
