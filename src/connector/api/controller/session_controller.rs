use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::SettingsChange;
use crate::domain::{
    ChatModel, ChatSession, ChatSettings, DomainError, Language, Message, SessionPhase,
};

use super::super::Container;

/// Configuration panel submission. Absent fields keep their current value;
/// an empty `api_key` clears the explicit credential.
#[derive(Default, Deserialize)]
pub struct SettingsRequest {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub languages: Option<Vec<String>>,
}

impl SettingsRequest {
    pub fn into_change(self) -> Result<SettingsChange, DomainError> {
        let model = self.model.as_deref().map(ChatModel::parse).transpose()?;
        let languages = self
            .languages
            .map(|names| {
                names
                    .iter()
                    .map(|name| {
                        Language::from_name(name).ok_or_else(|| {
                            DomainError::invalid_input(format!("Unsupported language: {}", name))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(SettingsChange {
            api_key: self.api_key,
            model,
            temperature: self.temperature,
            languages,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub model: ChatModel,
    pub temperature: f32,
    pub languages: Vec<Language>,
    pub has_api_key: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub phase: SessionPhase,
    pub settings: SettingsView,
    /// Transcript without the system message.
    pub messages: Vec<Message>,
    pub system_prompt: String,
    pub system_prompt_preview: String,
}

impl SessionView {
    pub fn new(session: &ChatSession, phase: SessionPhase) -> Self {
        let settings = session.settings();
        Self {
            id: session.id(),
            phase,
            settings: SettingsView {
                model: settings.model(),
                temperature: settings.temperature(),
                languages: settings.languages().to_vec(),
                has_api_key: settings.has_api_key(),
            },
            messages: session.conversation().snapshot_excluding_system(),
            system_prompt: session.conversation().system_prompt().to_string(),
            system_prompt_preview: session.system_prompt_preview(),
        }
    }
}

pub struct SessionController<'a> {
    container: &'a Container,
}

impl<'a> SessionController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn create(&self, request: Option<SettingsRequest>) -> Result<SessionView, DomainError> {
        let settings = match request {
            Some(request) => request.into_change()?.apply_to(ChatSettings::default())?,
            None => ChatSettings::default(),
        };
        let session = self.container.start_session_use_case().execute(settings).await?;
        Ok(self.view(&session))
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionView, DomainError> {
        let session = self.container.get_session_use_case().execute(id).await?;
        Ok(self.view(&session))
    }

    pub async fn update_settings(
        &self,
        id: Uuid,
        request: SettingsRequest,
    ) -> Result<SessionView, DomainError> {
        let change = request.into_change()?;
        let session = self
            .container
            .update_settings_use_case()
            .execute(id, change)
            .await?;
        Ok(self.view(&session))
    }

    pub async fn reset(&self, id: Uuid) -> Result<SessionView, DomainError> {
        let session = self.container.reset_use_case().execute(id).await?;
        Ok(self.view(&session))
    }

    fn view(&self, session: &ChatSession) -> SessionView {
        SessionView::new(session, self.container.phase_of(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_change_parses_names_and_codes() {
        let request = SettingsRequest {
            model: Some("gpt-4o".to_string()),
            languages: Some(vec!["한국어".to_string(), "en".to_string()]),
            ..Default::default()
        };
        let change = request.into_change().unwrap();

        assert_eq!(change.model, Some(ChatModel::Gpt4o));
        assert_eq!(change.languages, Some(vec![Language::Korean, Language::English]));
    }

    #[test]
    fn test_into_change_rejects_unknown_language() {
        let request = SettingsRequest {
            languages: Some(vec!["라틴어".to_string()]),
            ..Default::default()
        };
        assert!(request.into_change().unwrap_err().is_invalid_input());
    }
}
