use uuid::Uuid;

use crate::connector::render_page;
use crate::domain::{ChatSettings, DomainError};

use super::super::Container;

pub struct PageController<'a> {
    container: &'a Container,
}

impl<'a> PageController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Starts a session with default settings and returns the page path for it.
    pub async fn open(&self) -> Result<String, DomainError> {
        let session = self
            .container
            .start_session_use_case()
            .execute(ChatSettings::default())
            .await?;
        Ok(format!("/sessions/{}", session.id()))
    }

    pub async fn page(&self, id: Uuid) -> Result<String, DomainError> {
        let session = self.container.get_session_use_case().execute(id).await?;
        Ok(render_page(&session, self.container.phase_of(&session)))
    }
}
