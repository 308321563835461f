// Use case: delete_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::ApiKeyUseCaseError;
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};

/// Permanently removes a key and any plaintext still held for it.
pub struct DeleteApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct DeleteApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub key_id: ApiKeyId,
}

impl DeleteApiKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: DeleteApiKeyCommand,
    ) -> Result<(), ApiKeyUseCaseError> {
        // Remove the record and, under the same session lock, its held plaintext.
        ctx.sessions
            .retire_key(cmd.key_id, ctx.key_lifecycle.delete(cmd.owner, cmd.key_id))
            .await?;
        Ok(())
    }
}
