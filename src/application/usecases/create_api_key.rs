// Use case: create_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::{ApiKeyUseCaseError, ApiKeyView};
use crate::domain::value_objects::ids::{OwnerId, SessionId};

/// Issues a new key and parks its plaintext in the caller's session.
pub struct CreateApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct CreateApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
    pub key_name: String,
}

impl CreateApiKeyUseCase {
    /// Create a key. The returned view is masked; the plaintext is only
    /// available through reveal, from the same session.
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreateApiKeyCommand,
    ) -> Result<ApiKeyView, ApiKeyUseCaseError> {
        // Step 1: Issue and persist the key.
        let (record, secret) = ctx.key_lifecycle.create(cmd.owner, &cmd.key_name).await?;

        // Step 2: Replace whatever the session held with the new plaintext.
        let view = ctx
            .sessions
            .with_session(cmd.session_id, move |disclosure| {
                disclosure.hold(&record, secret);
                ApiKeyView::from_session(record, disclosure)
            })
            .await;

        Ok(view)
    }
}
