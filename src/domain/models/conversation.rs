use super::{Message, Role};
use crate::domain::DomainError;

/// Ordered transcript of one session.
///
/// The first element is always the system instruction and no other system
/// message can be appended, so the sequence is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn initialize(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Discards the whole history and starts over from a single system message.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        *self = Self::initialize(system_prompt);
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<(), DomainError> {
        if role == Role::System {
            return Err(DomainError::invalid_input(
                "the system message can only be set by initialize or reset",
            ));
        }
        self.messages.push(Message::new(role, content));
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn system_prompt(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content())
            .unwrap_or_default()
    }

    pub fn snapshot_excluding_system(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| !m.is_system())
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
