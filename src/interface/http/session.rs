use crate::domain::value_objects::ids::SessionId;
use crate::interface::http::trace::header_text;
use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Resolves the dashboard session for a request, minting one when the
/// header is absent or not a UUID. The id is echoed on the response.
pub async fn session_middleware(mut req: Request<Body>, next: Next) -> Response {
    // Step 1: Reuse the caller's session or start a new one.
    let session_id = header_text(&req, SESSION_ID_HEADER)
        .and_then(|raw| SessionId::parse(&raw))
        .unwrap_or_default();
    req.extensions_mut().insert(session_id);

    // Step 2: Run the request and hand the id back.
    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&session_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(SESSION_ID_HEADER), value);
    }
    response
}
