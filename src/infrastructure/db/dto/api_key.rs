use crate::domain::entities::api_key::ApiKeyRecord;
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use crate::domain::value_objects::secret::{KeyDigest, KeyPrefix};
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRow {
    pub id: uuid::Uuid,
    pub owner_id: uuid::Uuid,
    pub key_name: String,
    pub key_hash: String,
    pub key_prefix: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    /// Assigned by the store on insert; ignored on the way in.
    pub seq: i64,
}

impl ApiKeyRow {
    pub fn from_record(record: &ApiKeyRecord) -> Self {
        Self {
            id: record.id.0,
            owner_id: record.owner_id.0,
            key_name: record.key_name.clone(),
            key_hash: record.digest.as_str().to_string(),
            key_prefix: record.prefix.as_str().to_string(),
            is_active: record.is_active,
            created_at: record.created_at.as_inner(),
            seq: 0,
        }
    }

    pub fn into_record(self) -> ApiKeyRecord {
        ApiKeyRecord {
            id: ApiKeyId(self.id),
            owner_id: OwnerId(self.owner_id),
            key_name: self.key_name,
            digest: KeyDigest::from_hex(self.key_hash),
            prefix: KeyPrefix::from_string(self.key_prefix),
            is_active: self.is_active,
            created_at: Timestamp::from(self.created_at),
        }
    }
}
