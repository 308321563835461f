use crate::domain::services::disclosure::DisclosureController;
use crate::domain::value_objects::ids::{ApiKeyId, SessionId};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct SessionEntry {
    disclosure: DisclosureController,
    last_seen: Instant,
}

/// Per-session disclosure slots, kept in process memory only.
///
/// A session idle for `idle_ttl` or longer is dropped together with any
/// plaintext it still holds. Eviction happens on the next access.
pub struct SessionRegistry {
    idle_ttl: Duration,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            idle_ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the session's disclosure controller, creating it if needed.
    pub async fn with_session<R>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&mut DisclosureController) -> R,
    ) -> R {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();

        // Step 1: Drop idle sessions.
        let before = sessions.len();
        let ttl = self.idle_ttl;
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "sessions_evicted");
        }

        // Step 2: Touch (or open) the caller's session.
        let entry = sessions.entry(session_id).or_insert_with(|| SessionEntry {
            disclosure: DisclosureController::new(),
            last_seen: now,
        });
        entry.last_seen = now;

        f(&mut entry.disclosure)
    }

    /// Run `removal` with every session locked and, if it succeeds, drop the
    /// plaintext of `key_id` wherever it is held. No reveal can interleave
    /// between the record going away and its plaintext being forgotten.
    pub async fn retire_key<T, E>(
        &self,
        key_id: ApiKeyId,
        removal: impl Future<Output = Result<T, E>>,
    ) -> Result<T, E> {
        let mut sessions = self.sessions.lock().await;
        let out = removal.await?;
        for entry in sessions.values_mut() {
            entry.disclosure.forget(key_id);
        }
        Ok(out)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
