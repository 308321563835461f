use crate::domain::value_objects::ids::OwnerId;
use crate::interface::http::trace::header_text;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

/// Header the upstream dashboard gateway sets to the signed-in user's id.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// Attaches the caller's `OwnerId` to the request when the header carries one.
///
/// Nothing is rejected here. Handlers read `Option<Extension<OwnerId>>` and
/// the use cases turn a missing owner into `NotAuthenticated`.
pub async fn identity_middleware(mut req: Request<Body>, next: Next) -> Response {
    if let Some(raw) = header_text(&req, OWNER_ID_HEADER) {
        match OwnerId::parse(&raw) {
            Some(owner_id) => {
                req.extensions_mut().insert(owner_id);
            }
            None => debug!("owner_header_invalid"),
        }
    }
    next.run(req).await
}
