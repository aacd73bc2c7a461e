use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::SessionRepository;
use crate::domain::{unix_timestamp, DomainError, ExportDocument};

pub struct ExportConversationUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl ExportConversationUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, id: Uuid) -> Result<ExportDocument, DomainError> {
        self.execute_at(id, unix_timestamp()).await
    }

    /// Same as [`Self::execute`] with an explicit export time.
    pub async fn execute_at(&self, id: Uuid, exported_at: u64) -> Result<ExportDocument, DomainError> {
        let session = self
            .session_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Session not found: {}", id)))?;

        let snapshot = session.conversation().snapshot_excluding_system();
        let document = ExportDocument::from_messages(&snapshot, exported_at)?;

        info!(
            "Exported {} messages from session {} as {}",
            snapshot.len(),
            id,
            document.file_name()
        );

        Ok(document)
    }
}
