// Use case: rotate_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::{ApiKeyUseCaseError, ApiKeyView};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId, SessionId};

/// Swaps a key for a new one with the same name; the new plaintext is held
/// by the caller's session.
pub struct RotateApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct RotateApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
    pub key_id: ApiKeyId,
}

impl RotateApiKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: RotateApiKeyCommand,
    ) -> Result<ApiKeyView, ApiKeyUseCaseError> {
        // Step 1: Replace the record; the old plaintext is dropped wherever it is held.
        let (record, secret) = ctx
            .sessions
            .retire_key(cmd.key_id, ctx.key_lifecycle.rotate(cmd.owner, cmd.key_id))
            .await?;

        // Step 2: Hold the replacement in this session.
        Ok(ctx
            .sessions
            .with_session(cmd.session_id, move |disclosure| {
                disclosure.hold(&record, secret);
                ApiKeyView::from_session(record, disclosure)
            })
            .await)
    }
}
