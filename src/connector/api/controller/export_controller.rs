use uuid::Uuid;

use crate::domain::{DomainError, ExportDocument};

use super::super::Container;

pub struct ExportController<'a> {
    container: &'a Container,
}

impl<'a> ExportController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn export(&self, id: Uuid) -> Result<ExportDocument, DomainError> {
        self.container.export_use_case().execute(id).await
    }

    /// `Content-Disposition` value offering the document as a download.
    pub fn content_disposition(document: &ExportDocument) -> String {
        format!("attachment; filename=\"{}\"", document.file_name())
    }
}
