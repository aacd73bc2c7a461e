use async_trait::async_trait;

use crate::domain::{DomainError, PendingTurn};

/// An interface for sending a whole conversation to a chat-completion
/// endpoint and receiving the assistant's reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Any failure (transport, status, malformed body) is reported as an
/// error; turning it into something the user sees is the caller's job.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send every message of `turn` (system first) with its model and
    /// temperature, and return the first choice's text.
    async fn complete(&self, turn: &PendingTurn) -> Result<String, DomainError>;
}
