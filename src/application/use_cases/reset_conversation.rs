use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, DomainError};

pub struct ResetConversationUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl ResetConversationUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<ChatSession, DomainError> {
        let session = self
            .session_repo
            .update(id, Box::new(|session: ChatSession| -> Result<ChatSession, DomainError> {
                Ok(session.reset())
            }))
            .await?;

        info!("Reset conversation for session {}", id);

        Ok(session)
    }
}
