use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::context::AppContext;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    /// Set when a Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}
