use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::application::{SessionRepository, SessionUpdate};
use crate::domain::{ChatSession, DomainError};

/// Process-local session storage. Sessions live until the server stops.
pub struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<Uuid, ChatSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id(), session.clone());
        debug!("Saved session {} ({} live)", session.id(), sessions.len());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, DomainError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, apply: SessionUpdate<'_>) -> Result<ChatSession, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let current = sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Session not found: {}", id)))?;

        let next = apply(current)?;
        sessions.insert(id, next.clone());
        Ok(next)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.lock().await.len())
    }
}
