use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::connector::render_message;
use crate::domain::{DomainError, Message, SessionPhase};

use super::super::Container;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

/// A stored message together with its bubble, so the page can show it
/// without a full redraw.
#[derive(Debug, Serialize)]
pub struct RenderedMessage {
    pub message: Message,
    pub html: String,
}

impl RenderedMessage {
    fn new(message: Message) -> Self {
        let html = render_message(&message).unwrap_or_default();
        Self { message, html }
    }
}

#[derive(Debug, Serialize)]
pub struct TurnView {
    pub phase: SessionPhase,
    pub message_count: usize,
    pub failed: bool,
    pub appended: bool,
    pub user: RenderedMessage,
    pub assistant: RenderedMessage,
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn send(&self, id: Uuid, request: MessageRequest) -> Result<TurnView, DomainError> {
        let outcome = self
            .container
            .send_message_use_case()
            .execute(id, &request.content)
            .await?;

        Ok(TurnView {
            phase: self.container.phase_of(&outcome.session),
            message_count: outcome.session.conversation().message_count(),
            failed: outcome.failed,
            appended: outcome.appended,
            user: RenderedMessage::new(outcome.user_message),
            assistant: RenderedMessage::new(outcome.assistant_message),
        })
    }
}
