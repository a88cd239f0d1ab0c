//! In-memory multi-session registry.
//!
//! Each caller gets an exclusively-owned `Session` behind its own async
//! mutex. The registry lock is held only to resolve the entry, never across a
//! completion call, so independent conversations stay isolated; turns within
//! one conversation serialize on the session mutex.

use crate::dialogue::{Orchestrator, Session};
use crate::providers::CompletionClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SessionRegistry {
    orchestrator: Orchestrator,
    sessions: Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            orchestrator: Orchestrator::new(client),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run one turn for the given session, creating it on first use.
    pub async fn submit(&self, session_id: &str, user_text: &str) -> String {
        let session = self.resolve(session_id).await;
        let mut session = session.lock().await;
        self.orchestrator.handle(&mut session, user_text).await
    }

    /// Full reset of a session's state. A no-op for unknown ids.
    pub async fn reset(&self, session_id: &str) {
        let existing = self.sessions.lock().await.get(session_id).cloned();
        if let Some(session) = existing {
            session.lock().await.clear();
            tracing::debug!(session_id, "session reset");
        }
    }

    /// Drop a session entirely. Returns whether it existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    async fn resolve(&self, session_id: &str) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id, "session created");
                Arc::new(Mutex::new(Session::new()))
            })
            .clone()
    }
}
