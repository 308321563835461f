// Use case: list_api_keys.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::{ApiKeyUseCaseError, ApiKeyView};
use crate::domain::value_objects::ids::{OwnerId, SessionId};

/// Lists the caller's keys, newest first, as the session sees them.
pub struct ListApiKeysUseCase;

#[derive(Debug, Clone)]
pub struct ListApiKeysCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
}

impl ListApiKeysUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: ListApiKeysCommand,
    ) -> Result<Vec<ApiKeyView>, ApiKeyUseCaseError> {
        // Step 1: Load the owner's records.
        let records = ctx.key_lifecycle.list(cmd.owner).await?;

        // Step 2: Render each one against the session's disclosure slot.
        let views = ctx
            .sessions
            .with_session(cmd.session_id, move |disclosure| {
                records
                    .into_iter()
                    .map(|record| ApiKeyView::from_session(record, disclosure))
                    .collect::<Vec<_>>()
            })
            .await;

        Ok(views)
    }
}
