// Use case: hide_api_key.

use crate::application::context::AppContext;
use crate::application::shared::api_key_types::ApiKeyUseCaseError;
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId, SessionId};

/// Masks the session's revealed key again; it stays revealable.
pub struct HideApiKeyUseCase;

#[derive(Debug, Clone)]
pub struct HideApiKeyCommand {
    pub owner: Option<OwnerId>,
    pub session_id: SessionId,
    pub key_id: ApiKeyId,
}

impl HideApiKeyUseCase {
    pub async fn execute(ctx: &AppContext, cmd: HideApiKeyCommand) -> Result<(), ApiKeyUseCaseError> {
        let owner_id = cmd.owner.ok_or(ApiKeyUseCaseError::NotAuthenticated)?;
        ctx.sessions
            .with_session(cmd.session_id, |disclosure| {
                disclosure.hide(owner_id, cmd.key_id)
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HideApiKeyCommand, HideApiKeyUseCase};
    use crate::application::context::test_support::{caller, test_context};
    use crate::application::shared::api_key_types::ApiKeyUseCaseError;
    use crate::application::usecases::create_api_key::{CreateApiKeyCommand, CreateApiKeyUseCase};
    use crate::application::usecases::reveal_api_key::{RevealApiKeyCommand, RevealApiKeyUseCase};
    use crate::domain::services::disclosure::DisclosureState;
    use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};

    #[tokio::test]
    async fn given_revealed_key_when_hidden_should_return_to_hidden_state() {
        let ctx = test_context();
        let (owner, session) = caller();
        let created = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                owner: Some(owner),
                session_id: session,
                key_name: "Prod".to_string(),
            },
        )
        .await
        .unwrap();
        RevealApiKeyUseCase::execute(
            &ctx,
            RevealApiKeyCommand {
                owner: Some(owner),
                session_id: session,
                key_id: created.record.id,
            },
        )
        .await
        .unwrap();

        HideApiKeyUseCase::execute(
            &ctx,
            HideApiKeyCommand {
                owner: Some(owner),
                session_id: session,
                key_id: created.record.id,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            ctx.sessions.with_session(session, |d| d.state()).await,
            DisclosureState::Hidden
        );
    }

    #[tokio::test]
    async fn given_other_owner_or_other_key_when_hiding_should_fail_nothing_to_reveal() {
        let ctx = test_context();
        let (owner, session) = caller();
        let created = CreateApiKeyUseCase::execute(
            &ctx,
            CreateApiKeyCommand {
                owner: Some(owner),
                session_id: session,
                key_name: "Prod".to_string(),
            },
        )
        .await
        .unwrap();

        let foreign = HideApiKeyUseCase::execute(
            &ctx,
            HideApiKeyCommand {
                owner: Some(OwnerId::new()),
                session_id: session,
                key_id: created.record.id,
            },
        )
        .await;
        let wrong_key = HideApiKeyUseCase::execute(
            &ctx,
            HideApiKeyCommand {
                owner: Some(owner),
                session_id: session,
                key_id: ApiKeyId::new(),
            },
        )
        .await;

        assert_eq!(foreign.unwrap_err(), ApiKeyUseCaseError::NothingToReveal);
        assert_eq!(wrong_key.unwrap_err(), ApiKeyUseCaseError::NothingToReveal);
    }
}
