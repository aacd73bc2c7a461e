use std::sync::Arc;

use tracing::debug;

use crate::application::{
    ChatClient, ExportConversationUseCase, GetSessionUseCase, ResetConversationUseCase,
    SendMessageUseCase, SessionRepository, StartSessionUseCase, UpdateSettingsUseCase,
};
use crate::connector::{InMemorySessionRepository, MockChatClient, OpenAiChatClient};
use crate::domain::{ChatSession, SessionPhase};

/// Environment variable consulted when a session has no explicit API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct ContainerConfig {
    /// Base URL of the chat-completions server.
    pub base_url: String,
    /// Answer with [`MockChatClient`] instead of calling the API.
    pub mock_llm: bool,
    /// Credential used by sessions that did not enter one.
    pub fallback_api_key: Option<String>,
}

impl ContainerConfig {
    /// Reads the credential fallback from [`API_KEY_ENV`]. Blank values count as absent.
    pub fn fallback_api_key_from_env() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

pub struct Container {
    session_repo: Arc<dyn SessionRepository>,
    chat_client: Arc<dyn ChatClient>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let chat_client: Arc<dyn ChatClient> = if config.mock_llm {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            debug!("Using OpenAI chat client at {}", config.base_url);
            Arc::new(OpenAiChatClient::new(config.base_url.as_str()))
        };

        Self::with_chat_client(config, chat_client)
    }

    /// Builds a container around an explicit completion client.
    pub fn with_chat_client(config: ContainerConfig, chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            session_repo: Arc::new(InMemorySessionRepository::new()),
            chat_client,
            config,
        }
    }

    pub fn start_session_use_case(&self) -> StartSessionUseCase {
        StartSessionUseCase::new(self.session_repo.clone())
    }

    pub fn get_session_use_case(&self) -> GetSessionUseCase {
        GetSessionUseCase::new(self.session_repo.clone())
    }

    pub fn update_settings_use_case(&self) -> UpdateSettingsUseCase {
        UpdateSettingsUseCase::new(self.session_repo.clone())
    }

    pub fn send_message_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(
            self.session_repo.clone(),
            self.chat_client.clone(),
            self.config.fallback_api_key.clone(),
        )
    }

    pub fn reset_use_case(&self) -> ResetConversationUseCase {
        ResetConversationUseCase::new(self.session_repo.clone())
    }

    pub fn export_use_case(&self) -> ExportConversationUseCase {
        ExportConversationUseCase::new(self.session_repo.clone())
    }

    pub fn session_repository(&self) -> Arc<dyn SessionRepository> {
        self.session_repo.clone()
    }

    pub fn fallback_api_key(&self) -> Option<&str> {
        self.config.fallback_api_key.as_deref()
    }

    /// Phase of `session` given this server's credential fallback.
    pub fn phase_of(&self, session: &ChatSession) -> SessionPhase {
        session.phase(self.fallback_api_key())
    }
}
