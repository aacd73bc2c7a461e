use std::sync::Arc;

use uuid::Uuid;

use crate::application::SessionRepository;
use crate::domain::{ChatSession, DomainError};

pub struct GetSessionUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl GetSessionUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<ChatSession, DomainError> {
        self.session_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session not found: {}", id)))
    }
}
