use axum::body::Body;
use axum::http::{Request, StatusCode};
use keyward::application::context::AppContext;
use keyward::application::sessions::SessionRegistry;
use keyward::domain::services::key_lifecycle::KeyLifecycle;
use keyward::domain::services::secret_generator::OsSecretGenerator;
use keyward::infrastructure::db::repositories::Repositories;
use keyward::interface::http;
use keyward::interface::http::state::AppState;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

fn state_with(metrics: Option<PrometheusHandle>) -> AppState {
    let repos = Repositories::in_memory();
    let lifecycle = KeyLifecycle::new(repos.api_key.clone(), Arc::new(OsSecretGenerator));
    let ctx = AppContext::new(
        repos,
        Arc::new(lifecycle),
        Arc::new(SessionRegistry::new(Duration::from_secs(60))),
    );
    AppState {
        ctx: Arc::new(ctx),
        metrics,
    }
}

async fn get(state: AppState, uri: &str) -> axum::response::Response {
    http::app(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn given_running_app_when_health_should_return_ok() {
    let response = get(state_with(None), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_in_memory_store_when_ready_should_return_ok() {
    let response = get(state_with(None), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_metrics_disabled_when_scraped_should_return_unavailable() {
    let response = get(state_with(None), "/metrics").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn given_recorder_handle_when_scraped_should_return_text() {
    let handle = PrometheusBuilder::new().build_recorder().handle();

    let response = get(state_with(Some(handle)), "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}
