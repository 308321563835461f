use crate::application::shared::api_key_types::{ApiKeyView, RevealedApiKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    pub key_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetApiKeyActiveRequest {
    pub is_active: bool,
}

/// A key as shown on the dashboard. Never carries the digest.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub key_id: String,
    pub key_name: String,
    pub key_prefix: String,
    pub display: String,
    pub is_active: bool,
    pub created_at: String,
    pub revealable: bool,
}

impl From<ApiKeyView> for ApiKeyResponse {
    fn from(view: ApiKeyView) -> Self {
        let record = view.record;
        Self {
            key_id: record.id.to_string(),
            key_name: record.key_name,
            key_prefix: record.prefix.as_str().to_string(),
            display: view.display,
            is_active: record.is_active,
            created_at: record.created_at.to_rfc3339(),
            revealable: view.revealable,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiKeyListResponse {
    pub api_keys: Vec<ApiKeyResponse>,
}

#[derive(Debug, Serialize)]
pub struct RevealApiKeyResponse {
    pub key_id: String,
    pub api_key: String,
}

impl From<RevealedApiKey> for RevealApiKeyResponse {
    fn from(revealed: RevealedApiKey) -> Self {
        Self {
            key_id: revealed.key_id.to_string(),
            api_key: revealed.api_key.expose().to_string(),
        }
    }
}
