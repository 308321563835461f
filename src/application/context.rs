use std::sync::Arc;

use crate::application::sessions::SessionRegistry;
use crate::domain::services::key_lifecycle::KeyLifecycleService;
use crate::infrastructure::db::repositories::Repositories;

/// Shared application resources used by use cases and services.
pub struct AppContext {
    pub repos: Repositories,
    pub key_lifecycle: Arc<dyn KeyLifecycleService>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppContext {
    /// Build a new application context with shared repositories and services.
    pub fn new(
        repos: Repositories,
        key_lifecycle: Arc<dyn KeyLifecycleService>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            repos,
            key_lifecycle,
            sessions,
        }
    }
}
