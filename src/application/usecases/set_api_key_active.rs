// Use case: set_api_key_active.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::{ApiKeyUseCaseError, ApiKeyView};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId, SessionId};

/// Enables or disables a key without touching anything else about it.
pub struct SetApiKeyActiveUseCase;

#[derive(Debug, Clone)]
pub struct SetApiKeyActiveCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
    pub key_id: ApiKeyId,
    pub is_active: bool,
}

impl SetApiKeyActiveUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: SetApiKeyActiveCommand,
    ) -> Result<ApiKeyView, ApiKeyUseCaseError> {
        let record = ctx
            .key_lifecycle
            .set_active(cmd.owner, cmd.key_id, cmd.is_active)
            .await?;

        Ok(ctx
            .sessions
            .with_session(cmd.session_id, move |d| ApiKeyView::from_session(record, d))
            .await)
    }
}
