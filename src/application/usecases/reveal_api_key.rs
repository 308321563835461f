// Use case: reveal_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::{ApiKeyUseCaseError, RevealedApiKey};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId, SessionId};
use crate::domain::value_objects::secret::PlaintextSecret;
use tracing::info;

/// Shows the plaintext of the key the session holds, if it is `key_id`.
pub struct RevealApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct RevealApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
    pub key_id: ApiKeyId,
}

impl RevealApiKeyUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: RevealApiKeyCommand,
    ) -> Result<RevealedApiKey, ApiKeyUseCaseError> {
        let owner_id = cmd.owner.ok_or(ApiKeyUseCaseError::NotAuthenticated)?;

        let api_key = ctx
            .sessions
            .with_session(cmd.session_id, |disclosure| {
                disclosure
                    .reveal(owner_id, cmd.key_id)
                    .map(|secret| PlaintextSecret::new(secret.expose().to_string()))
            })
            .await?;

        info!(owner_id = %owner_id, key_id = %cmd.key_id, "api_key_revealed");
        Ok(RevealedApiKey {
            key_id: cmd.key_id,
            api_key,
        })
    }
}
