use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::{ChatClient, SessionRepository};
use crate::domain::{ChatSession, DomainError, Message, PendingTurn};

/// Prefix of the assistant message that stands in for a failed completion.
pub const COMPLETION_FAILURE_PREFIX: &str = "오류가 발생했어요: ";

/// Result of one user turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub session: ChatSession,
    pub user_message: Message,
    pub assistant_message: Message,
    /// The completion call failed and `assistant_message` carries the error.
    pub failed: bool,
    /// `false` when the session was reset while the request was in flight and
    /// the reply was discarded.
    pub appended: bool,
}

/// Converts a completion failure into the visible assistant reply.
pub fn fail_soft_reply(error: &DomainError) -> String {
    format!("{}{}", COMPLETION_FAILURE_PREFIX, error)
}

/// Runs one Idle → AwaitingResponse → Idle cycle for a session.
///
/// The completion call never fails the turn: errors come back as an
/// assistant message, so the conversation simply continues.
pub struct SendMessageUseCase {
    session_repo: Arc<dyn SessionRepository>,
    chat_client: Arc<dyn ChatClient>,
    fallback_api_key: Option<String>,
}

impl SendMessageUseCase {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        chat_client: Arc<dyn ChatClient>,
        fallback_api_key: Option<String>,
    ) -> Self {
        Self {
            session_repo,
            chat_client,
            fallback_api_key,
        }
    }

    pub async fn execute(&self, id: Uuid, input: &str) -> Result<TurnOutcome, DomainError> {
        let mut pending: Option<PendingTurn> = None;
        let fallback = self.fallback_api_key.as_deref();
        let slot = &mut pending;

        self.session_repo
            .update(
                id,
                Box::new(move |session: ChatSession| -> Result<ChatSession, DomainError> {
                    let (session, turn) = session.begin_turn(input, fallback)?;
                    *slot = Some(turn);
                    Ok(session)
                }),
            )
            .await?;

        let turn = pending.ok_or_else(|| DomainError::internal("turn was not started"))?;
        let user_message = turn
            .user_message()
            .cloned()
            .ok_or_else(|| DomainError::internal("turn has no user message"))?;

        // The turn runs on its own task so that it still completes, and the
        // session returns to idle, when the caller stops waiting for it.
        let finish = tokio::spawn(finish_turn(
            self.session_repo.clone(),
            self.chat_client.clone(),
            id,
            turn,
        ));
        let (session, assistant_message, failed, appended) = finish
            .await
            .map_err(|e| DomainError::internal(format!("turn task failed: {e}")))??;

        Ok(TurnOutcome {
            session,
            user_message,
            assistant_message,
            failed,
            appended,
        })
    }
}

/// Calls the completion client and commits the reply, fail-soft.
async fn finish_turn(
    session_repo: Arc<dyn SessionRepository>,
    chat_client: Arc<dyn ChatClient>,
    id: Uuid,
    turn: PendingTurn,
) -> Result<(ChatSession, Message, bool, bool), DomainError> {
    info!(
        "Requesting completion for session {} (model={}, temperature={:.1}, messages={})",
        id,
        turn.model(),
        turn.temperature(),
        turn.messages().len()
    );

    let start_time = Instant::now();
    let (reply, failed) = match chat_client.complete(&turn).await {
        Ok(text) => {
            debug!("Completion returned {} chars", text.chars().count());
            (text, false)
        }
        Err(e) => {
            warn!("Completion failed for session {}: {}", id, e);
            (fail_soft_reply(&e), true)
        }
    };
    info!(
        "Completion for session {} finished in {:?}",
        id,
        start_time.elapsed()
    );

    let assistant_message = Message::assistant(reply.clone());
    let mut appended = false;
    let appended_slot = &mut appended;
    let turn_ref = &turn;

    let session = session_repo
        .update(
            id,
            Box::new(move |session: ChatSession| -> Result<ChatSession, DomainError> {
                let (session, was_appended) = session.complete_turn(turn_ref, reply);
                *appended_slot = was_appended;
                Ok(session)
            }),
        )
        .await?;

    if !appended {
        warn!(
            "Session {} was reset while waiting for a reply; reply discarded",
            id
        );
    }

    Ok((session, assistant_message, failed, appended))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_soft_reply_embeds_error_detail() {
        let err = DomainError::completion("connection refused");
        let reply = fail_soft_reply(&err);
        assert!(reply.starts_with(COMPLETION_FAILURE_PREFIX));
        assert!(reply.contains("connection refused"));
    }
}
