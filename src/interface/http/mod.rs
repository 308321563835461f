pub mod dto;
pub mod identity;
pub mod problem;
pub mod routes;
pub mod session;
pub mod state;
pub mod trace;

use axum::Router;
use axum::middleware;

use crate::interface::http::state::AppState;

/// Builds the full HTTP application.
///
/// Layers run outermost first: trace id, request log, session, identity.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::ready::router())
        .merge(routes::metrics::router())
        .merge(routes::api_key::router())
        .layer(middleware::from_fn(identity::identity_middleware))
        .layer(middleware::from_fn(session::session_middleware))
        .layer(middleware::from_fn(trace::request_log_middleware))
        .layer(middleware::from_fn(trace::trace_id_middleware))
        .with_state(state)
}
