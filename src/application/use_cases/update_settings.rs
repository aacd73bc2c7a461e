use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::application::SessionRepository;
use crate::domain::{ChatModel, ChatSession, ChatSettings, DomainError, Language};

/// Values submitted from the configuration panel. `None` keeps the current value.
#[derive(Clone, Default)]
pub struct SettingsChange {
    pub api_key: Option<String>,
    pub model: Option<ChatModel>,
    pub temperature: Option<f32>,
    pub languages: Option<Vec<Language>>,
}

impl std::fmt::Debug for SettingsChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsChange")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("languages", &self.languages)
            .finish()
    }
}

impl SettingsChange {
    pub fn apply_to(self, mut settings: ChatSettings) -> Result<ChatSettings, DomainError> {
        if let Some(api_key) = self.api_key {
            settings = settings.with_api_key(Some(api_key));
        }
        if let Some(model) = self.model {
            settings = settings.with_model(model);
        }
        if let Some(temperature) = self.temperature {
            settings = settings.with_temperature(temperature)?;
        }
        if let Some(languages) = self.languages {
            settings = settings.with_languages(languages);
        }
        Ok(settings)
    }
}

pub struct UpdateSettingsUseCase {
    session_repo: Arc<dyn SessionRepository>,
}

impl UpdateSettingsUseCase {
    pub fn new(session_repo: Arc<dyn SessionRepository>) -> Self {
        Self { session_repo }
    }

    /// The new language selection only reaches the system message on the
    /// next reset; the current transcript is never rewritten.
    pub async fn execute(&self, id: Uuid, change: SettingsChange) -> Result<ChatSession, DomainError> {
        let session = self
            .session_repo
            .update(
                id,
                Box::new(move |session: ChatSession| -> Result<ChatSession, DomainError> {
                    let settings = change.apply_to(session.settings().clone())?;
                    Ok(session.with_settings(settings))
                }),
            )
            .await?;

        debug!("Updated settings for session {}: {:?}", id, session.settings());

        Ok(session)
    }
}
