use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ChatSession, DomainError};

/// Transition applied to a stored session snapshot.
pub type SessionUpdate<'a> =
    Box<dyn FnOnce(ChatSession) -> Result<ChatSession, DomainError> + Send + 'a>;

/// Holds the current snapshot of every live session.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save(&self, session: &ChatSession) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, DomainError>;

    /// Applies `apply` to the stored snapshot atomically and stores the result.
    ///
    /// Returns `NotFound` for an unknown id. When `apply` fails the stored
    /// snapshot is left as it was.
    async fn update(&self, id: Uuid, apply: SessionUpdate<'_>) -> Result<ChatSession, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
