use std::sync::Arc;

use tracing::info;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, ChatSettings, DomainError};

/// Uninitialized → a fresh session whose transcript holds only the system message.
pub struct StartSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl StartSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, settings: ChatSettings) -> Result<ChatSession, DomainError> {
        let session = ChatSession::start(settings);
        self.session_repo.save(&session).await?;

        info!(
            "Started session {} (model={}, languages={})",
            session.id(),
            session.settings().model(),
            session.settings().languages().len()
        );

        Ok(session)
    }
}
