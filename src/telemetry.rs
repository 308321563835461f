use crate::config::{Log, Metrics};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset: our crate at the configured level.
fn default_filter(log: &Log) -> String {
    format!("keyward={},sqlx=warn", log.level)
}

/// Install the global tracing subscriber. `RUST_LOG` wins over config.
pub fn init_tracing(log: &Log) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log)));
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

/// Install the Prometheus recorder when metrics are enabled.
pub fn init_metrics(metrics: &Metrics) -> Result<Option<PrometheusHandle>, BuildError> {
    if !metrics.enabled {
        return Ok(None);
    }
    PrometheusBuilder::new().install_recorder().map(Some)
}
