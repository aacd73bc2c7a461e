use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ChatModel, ChatSettings, Conversation, Message, Role};
use crate::domain::{build_system_prompt, DomainError};

/// Where a session stands in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No usable credential; chat input is refused.
    AwaitingCredential,
    Idle,
    /// A completion request is in flight.
    AwaitingResponse,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::AwaitingCredential => "awaiting_credential",
            SessionPhase::Idle => "idle",
            SessionPhase::AwaitingResponse => "awaiting_response",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Picks the credential for a call: the explicit one wins over the fallback.
pub fn resolve_credential<'a>(explicit: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| fallback.filter(|k| !k.trim().is_empty()))
}

/// Everything the completion client needs for one user turn.
#[derive(Clone)]
pub struct PendingTurn {
    messages: Vec<Message>,
    model: ChatModel,
    temperature: f32,
    api_key: String,
    generation: u64,
}

impl PendingTurn {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn model(&self) -> ChatModel {
        self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn user_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl std::fmt::Debug for PendingTurn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTurn")
            .field("messages", &self.messages.len())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Session-scoped state: configuration plus transcript.
///
/// Every user action takes the current snapshot by value and returns the
/// next one. `generation` changes on every reset so that a reply for a
/// conversation that has since been reset is dropped instead of appended.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    settings: ChatSettings,
    conversation: Conversation,
    in_flight: bool,
    generation: u64,
}

impl ChatSession {
    pub fn start(settings: ChatSettings) -> Self {
        let conversation = Conversation::initialize(build_system_prompt(settings.languages()));
        Self {
            id: Uuid::new_v4(),
            settings,
            conversation,
            in_flight: false,
            generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self, fallback_key: Option<&str>) -> SessionPhase {
        if self.in_flight {
            SessionPhase::AwaitingResponse
        } else if resolve_credential(self.settings.api_key(), fallback_key).is_none() {
            SessionPhase::AwaitingCredential
        } else {
            SessionPhase::Idle
        }
    }

    /// Prompt the builder would produce for the current language selection.
    /// Differs from the active system message until the next reset.
    pub fn system_prompt_preview(&self) -> String {
        build_system_prompt(self.settings.languages())
    }

    /// Replaces the configuration. The transcript is left untouched.
    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Starts over with a fresh system message built from the current
    /// languages, whatever the current phase.
    pub fn reset(mut self) -> Self {
        self.conversation
            .reset(build_system_prompt(self.settings.languages()));
        self.in_flight = false;
        self.generation += 1;
        self
    }

    /// Idle → AwaitingResponse: appends the user message and hands back the
    /// request to send.
    pub fn begin_turn(
        mut self,
        input: &str,
        fallback_key: Option<&str>,
    ) -> Result<(Self, PendingTurn), DomainError> {
        if input.trim().is_empty() {
            return Err(DomainError::invalid_input("Message must not be empty"));
        }

        let api_key = match self.phase(fallback_key) {
            SessionPhase::AwaitingCredential => {
                return Err(DomainError::missing_credential(
                    "an API key is required before chatting",
                ))
            }
            SessionPhase::AwaitingResponse => {
                return Err(DomainError::busy(format!(
                    "session {} is waiting for a reply",
                    self.id
                )))
            }
            SessionPhase::Idle => resolve_credential(self.settings.api_key(), fallback_key)
                .map(str::to_string)
                .ok_or_else(|| DomainError::internal("credential vanished"))?,
        };

        self.conversation.append(Role::User, input)?;
        self.in_flight = true;

        let turn = PendingTurn {
            messages: self.conversation.messages().to_vec(),
            model: self.settings.model(),
            temperature: self.settings.temperature(),
            api_key,
            generation: self.generation,
        };
        Ok((self, turn))
    }

    /// AwaitingResponse → Idle. Returns `false` when the reply belonged to a
    /// conversation that was reset in the meantime and was discarded.
    pub fn complete_turn(mut self, turn: &PendingTurn, reply: String) -> (Self, bool) {
        if turn.generation != self.generation {
            return (self, false);
        }
        self.in_flight = false;
        let appended = self.conversation.append(Role::Assistant, reply).is_ok();
        (self, appended)
    }
}
