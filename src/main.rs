use keyward::application::context::AppContext;
use keyward::application::sessions::SessionRegistry;
use keyward::config;
use keyward::domain::services::key_lifecycle::KeyLifecycle;
use keyward::domain::services::secret_generator::OsSecretGenerator;
use keyward::infrastructure::db::postgres::PostgresDatabase;
use keyward::infrastructure::db::repositories::Repositories;
use keyward::interface::http;
use keyward::interface::http::state::AppState;
use keyward::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() {
    // Step 1: Load configuration and start logging/metrics.
    let settings = config::load().expect("load config");
    telemetry::init_tracing(&settings.log);
    let metrics = telemetry::init_metrics(&settings.metrics).expect("install metrics recorder");

    // Step 2: Pick the key store.
    let repos = if settings.db.is_memory() {
        info!("using in-memory key store");
        Repositories::in_memory()
    } else {
        let db = Arc::new(
            PostgresDatabase::connect(&settings.db.url, settings.db.max_connections)
                .await
                .expect("connect database"),
        );
        db.migrate().await.expect("run migrations");
        Repositories::postgres(db)
    };

    // Step 3: Build domain services and session state.
    let lifecycle = KeyLifecycle::new(repos.api_key.clone(), Arc::new(OsSecretGenerator));
    let sessions = SessionRegistry::new(Duration::from_secs(settings.sessions.idle_ttl_seconds));

    // Step 4: Assemble shared application context and HTTP state.
    let ctx = AppContext::new(repos, Arc::new(lifecycle), Arc::new(sessions));
    let state = AppState {
        ctx: Arc::new(ctx),
        metrics,
    };

    // Step 5: Build the HTTP app.
    let app = http::app(state);
    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Step 6: Bind and serve.
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("bind server");
    info!(addr = %bind_addr, "listening");

    axum::serve(listener, app).await.expect("serve");
}
