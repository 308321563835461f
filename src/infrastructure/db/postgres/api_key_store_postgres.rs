use crate::infrastructure::db::dto::ApiKeyRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::api_key_store::{ApiKeyRepositoryError, ApiKeyStore};
use async_trait::async_trait;
use sqlx::PgConnection;

const COLUMNS: &str = "id, owner_id, key_name, key_hash, key_prefix, is_active, created_at, seq";

#[derive(Clone)]
pub struct ApiKeyStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

fn map_sqlx(err: sqlx::Error) -> ApiKeyRepositoryError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ApiKeyRepositoryError::Conflict,
        _ => ApiKeyRepositoryError::StorageUnavailable,
    }
}

impl ApiKeyStorePostgres {
    /// Build a Postgres-backed API key store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<Option<ApiKeyRow>, ApiKeyRepositoryError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(&format!(
            "SELECT {COLUMNS} FROM api_keys WHERE id = $1 AND owner_id = $2"
        ))
        .bind(key_id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        Ok(row)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: &ApiKeyRow,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let stored = sqlx::query_as::<_, ApiKeyRow>(&format!(
            "INSERT INTO api_keys (
                id,
                owner_id,
                key_name,
                key_hash,
                key_prefix,
                is_active,
                created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING {COLUMNS}"
        ))
        .bind(row.id)
        .bind(row.owner_id)
        .bind(&row.key_name)
        .bind(&row.key_hash)
        .bind(&row.key_prefix)
        .bind(row.is_active)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        Ok(stored)
    }

    async fn set_active_impl_conn(
        conn: &mut PgConnection,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
        is_active: bool,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let stored = sqlx::query_as::<_, ApiKeyRow>(&format!(
            "UPDATE api_keys SET is_active = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING {COLUMNS}"
        ))
        .bind(key_id)
        .bind(owner_id)
        .bind(is_active)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        stored.ok_or(ApiKeyRepositoryError::NotFound)
    }

    async fn delete_impl_conn(
        conn: &mut PgConnection,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<(), ApiKeyRepositoryError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1 AND owner_id = $2")
            .bind(key_id)
            .bind(owner_id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(ApiKeyRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_by_owner_impl_conn(
        conn: &mut PgConnection,
        owner_id: uuid::Uuid,
    ) -> Result<Vec<ApiKeyRow>, ApiKeyRepositoryError> {
        let rows = sqlx::query_as::<_, ApiKeyRow>(&format!(
            "SELECT {COLUMNS} FROM api_keys
            WHERE owner_id = $1
            ORDER BY created_at DESC, seq DESC"
        ))
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        Ok(rows)
    }
}

#[async_trait]
impl ApiKeyStore for ApiKeyStorePostgres {
    async fn get(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<Option<ApiKeyRow>, ApiKeyRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, owner_id, key_id)))
            .await
    }

    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| {
                let row = row;
                Box::pin(async move { Self::insert_impl_conn(conn, &row).await })
            })
            .await
    }

    async fn set_active(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
        is_active: bool,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::set_active_impl_conn(conn, owner_id, key_id, is_active))
            })
            .await
    }

    async fn delete(
        &self,
        owner_id: uuid::Uuid,
        key_id: uuid::Uuid,
    ) -> Result<(), ApiKeyRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, owner_id, key_id)))
            .await
    }

    async fn list_by_owner(
        &self,
        owner_id: uuid::Uuid,
    ) -> Result<Vec<ApiKeyRow>, ApiKeyRepositoryError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::list_by_owner_impl_conn(conn, owner_id)))
            .await
    }

    async fn replace(
        &self,
        owner_id: uuid::Uuid,
        old_key_id: uuid::Uuid,
        row: &ApiKeyRow,
    ) -> Result<ApiKeyRow, ApiKeyRepositoryError> {
        let row = row.clone();
        self.db
            .with_tx(move |tx| {
                let row = row;
                Box::pin(async move {
                    // Step 1: Remove the old key; a missing key aborts the swap.
                    Self::delete_impl_conn(&mut **tx, owner_id, old_key_id).await?;
                    // Step 2: Insert its replacement in the same transaction.
                    Self::insert_impl_conn(&mut **tx, &row).await
                })
            })
            .await
    }
}
