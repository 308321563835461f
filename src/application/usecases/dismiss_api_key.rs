// Use case: dismiss_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::ApiKeyUseCaseError;
use crate::domain::value_objects::ids::{OwnerId, SessionId};
use tracing::debug;

/// Discards the plaintext the session holds for the caller. Idempotent; a key
/// held for another owner is left untouched.
pub struct DismissApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct DismissApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
}

impl DismissApiKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: DismissApiKeyCommand,
    ) -> Result<(), ApiKeyUseCaseError> {
        let owner_id = cmd.owner.ok_or(ApiKeyUseCaseError::NotAuthenticated)?;
        let dismissed = ctx
            .sessions
            .with_session(cmd.session_id, |disclosure| disclosure.dismiss(owner_id))
            .await;
        if let Some(key_id) = dismissed {
            debug!(owner_id = %owner_id, key_id = %key_id, "api_key_dismissed");
        }
        Ok(())
    }
}
