// HTTP routes: API key management for the signed-in owner.

use crate::application::shared::api_key_types::ApiKeyUseCaseError;
use crate::application::usecases::create_api_key::{CreateApiKeyCommand, CreateApiKeyUseCase};
use crate::application::usecases::delete_api_key::{DeleteApiKeyCommand, DeleteApiKeyUseCase};
use crate::application::usecases::dismiss_api_key::{DismissApiKeyCommand, DismissApiKeyUseCase};
use crate::application::usecases::hide_api_key::{HideApiKeyCommand, HideApiKeyUseCase};
use crate::application::usecases::list_api_keys::{ListApiKeysCommand, ListApiKeysUseCase};
use crate::application::usecases::reveal_api_key::{RevealApiKeyCommand, RevealApiKeyUseCase};
use crate::application::usecases::rotate_api_key::{RotateApiKeyCommand, RotateApiKeyUseCase};
use crate::application::usecases::set_api_key_active::{
    SetApiKeyActiveCommand, SetApiKeyActiveUseCase,
};
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId, SessionId};
use crate::interface::http::dto::api_keys::{
    ApiKeyListResponse, ApiKeyResponse, CreateApiKeyRequest, RevealApiKeyResponse,
    SetApiKeyActiveRequest,
};
use crate::interface::http::problem::{
    KEY_AUTH_REQUIRED, KEY_ENTROPY_UNAVAILABLE, KEY_NAME_INVALID, KEY_NOT_FOUND,
    KEY_NOT_REVEALABLE, KEY_REQUEST_MALFORMED, KEY_STORAGE_UNAVAILABLE, problem,
};
use crate::interface::http::state::AppState;
use crate::interface::http::trace::TraceId;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post};
use axum::{Json, Router};
use tracing::warn;

/// Builds the API key management routes.
///
/// Every response is `Cache-Control: no-store`: a view rendered while the
/// session's key is revealed carries its plaintext.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api-keys", post(create_key).get(list_keys))
        .route("/api-keys/dismiss", post(dismiss_key))
        .route("/api-keys/:id", patch(set_key_active).delete(delete_key))
        .route("/api-keys/:id/rotate", post(rotate_key))
        .route("/api-keys/:id/reveal", post(reveal_key))
        .route("/api-keys/:id/hide", post(hide_key))
        .layer(middleware::map_response(no_store))
}

async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Per-request values every handler needs for the use case and for errors.
struct Caller {
    owner: Option<OwnerId>,
    session_id: SessionId,
    instance: String,
    trace_id: Option<String>,
}

impl Caller {
    fn new(
        owner: Option<Extension<OwnerId>>,
        session_id: SessionId,
        uri: &Uri,
        trace_id: TraceId,
    ) -> Self {
        Self {
            owner: owner.map(|Extension(id)| id),
            session_id,
            instance: uri.path().to_string(),
            trace_id: Some(trace_id.0),
        }
    }

    fn malformed(self, detail: String) -> Response {
        problem(
            StatusCode::BAD_REQUEST,
            KEY_REQUEST_MALFORMED,
            Some(detail),
            Some(self.instance),
            self.trace_id,
        )
    }

    fn fail(self, err: ApiKeyUseCaseError) -> Response {
        let (status, code) = match &err {
            ApiKeyUseCaseError::NotAuthenticated => (StatusCode::UNAUTHORIZED, KEY_AUTH_REQUIRED),
            ApiKeyUseCaseError::InvalidName(_) => (StatusCode::BAD_REQUEST, KEY_NAME_INVALID),
            ApiKeyUseCaseError::NotFound => (StatusCode::NOT_FOUND, KEY_NOT_FOUND),
            ApiKeyUseCaseError::NothingToReveal => (StatusCode::CONFLICT, KEY_NOT_REVEALABLE),
            ApiKeyUseCaseError::EntropyUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, KEY_ENTROPY_UNAVAILABLE)
            }
            ApiKeyUseCaseError::Storage(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, KEY_STORAGE_UNAVAILABLE)
            }
        };
        // Storage and entropy detail stays in the logs.
        let detail = match &err {
            ApiKeyUseCaseError::Storage(_) => {
                warn!(error = %err, "api_key_storage_error");
                "storage unavailable".to_string()
            }
            ApiKeyUseCaseError::EntropyUnavailable(_) => {
                warn!(error = %err, "api_key_entropy_error");
                "could not generate a key".to_string()
            }
            other => other.to_string(),
        };
        problem(
            status,
            code,
            Some(detail),
            Some(self.instance),
            self.trace_id,
        )
    }
}

/// Issues a key. The response is masked; fetch the plaintext through reveal.
async fn create_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    payload: Result<Json<CreateApiKeyRequest>, JsonRejection>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    // Step 1: Validate the body shape.
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return caller.malformed(rejection.body_text()),
    };
    // Step 2: Execute the use case.
    let result = CreateApiKeyUseCase::execute(
        &state.ctx,
        CreateApiKeyCommand {
            owner: caller.owner,
            session_id: caller.session_id,
            key_name: payload.key_name,
        },
    )
    .await;
    // Step 3: Map the output.
    match result {
        Ok(view) => (StatusCode::CREATED, Json(ApiKeyResponse::from(view))).into_response(),
        Err(e) => caller.fail(e),
    }
}

async fn list_keys(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let result = ListApiKeysUseCase::execute(
        &state.ctx,
        ListApiKeysCommand {
            owner: caller.owner,
            session_id: caller.session_id,
        },
    )
    .await;
    match result {
        Ok(views) => Json(ApiKeyListResponse {
            api_keys: views.into_iter().map(ApiKeyResponse::from).collect(),
        })
        .into_response(),
        Err(e) => caller.fail(e),
    }
}

async fn set_key_active(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    Path(key_id): Path<String>,
    payload: Result<Json<SetApiKeyActiveRequest>, JsonRejection>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let Some(key_id) = ApiKeyId::parse(&key_id) else {
        return caller.malformed("invalid key id".to_string());
    };
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return caller.malformed(rejection.body_text()),
    };
    let result = SetApiKeyActiveUseCase::execute(
        &state.ctx,
        SetApiKeyActiveCommand {
            owner: caller.owner,
            session_id: caller.session_id,
            key_id,
            is_active: payload.is_active,
        },
    )
    .await;
    match result {
        Ok(view) => Json(ApiKeyResponse::from(view)).into_response(),
        Err(e) => caller.fail(e),
    }
}

async fn delete_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    Path(key_id): Path<String>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let Some(key_id) = ApiKeyId::parse(&key_id) else {
        return caller.malformed("invalid key id".to_string());
    };
    let result = DeleteApiKeyUseCase::execute(
        &state.ctx,
        DeleteApiKeyCommand {
            owner: caller.owner,
            key_id,
        },
    )
    .await;
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => caller.fail(e),
    }
}

/// Replaces a key with a new one of the same name, held for reveal.
async fn rotate_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    Path(key_id): Path<String>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let Some(key_id) = ApiKeyId::parse(&key_id) else {
        return caller.malformed("invalid key id".to_string());
    };
    let result = RotateApiKeyUseCase::execute(
        &state.ctx,
        RotateApiKeyCommand {
            owner: caller.owner,
            session_id: caller.session_id,
            key_id,
        },
    )
    .await;
    match result {
        Ok(view) => (StatusCode::CREATED, Json(ApiKeyResponse::from(view))).into_response(),
        Err(e) => caller.fail(e),
    }
}

async fn reveal_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    Path(key_id): Path<String>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let Some(key_id) = ApiKeyId::parse(&key_id) else {
        return caller.malformed("invalid key id".to_string());
    };
    let result = RevealApiKeyUseCase::execute(
        &state.ctx,
        RevealApiKeyCommand {
            owner: caller.owner,
            session_id: caller.session_id,
            key_id,
        },
    )
    .await;
    match result {
        Ok(revealed) => Json(RevealApiKeyResponse::from(revealed)).into_response(),
        Err(e) => caller.fail(e),
    }
}

async fn hide_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
    Path(key_id): Path<String>,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let Some(key_id) = ApiKeyId::parse(&key_id) else {
        return caller.malformed("invalid key id".to_string());
    };
    let result = HideApiKeyUseCase::execute(
        &state.ctx,
        HideApiKeyCommand {
            owner: caller.owner,
            session_id: caller.session_id,
            key_id,
        },
    )
    .await;
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => caller.fail(e),
    }
}

/// Discards the plaintext the session holds. Safe to repeat.
async fn dismiss_key(
    State(state): State<AppState>,
    owner: Option<Extension<OwnerId>>,
    Extension(session_id): Extension<SessionId>,
    Extension(trace_id): Extension<TraceId>,
    uri: Uri,
) -> Response {
    let caller = Caller::new(owner, session_id, &uri, trace_id);
    let result = DismissApiKeyUseCase::execute(
        &state.ctx,
        DismissApiKeyCommand {
            owner: caller.owner,
            session_id: caller.session_id,
        },
    )
    .await;
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => caller.fail(e),
    }
}
