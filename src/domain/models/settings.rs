use serde::{Deserialize, Serialize};

use super::Language;
use crate::domain::DomainError;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.5;
pub const TEMPERATURE_STEP: f32 = 0.1;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Models offered in the model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChatModel {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
}

impl ChatModel {
    pub const ALL: [ChatModel; 3] = [ChatModel::Gpt4oMini, ChatModel::Gpt4o, ChatModel::Gpt41Mini];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModel::Gpt4oMini => "gpt-4o-mini",
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::Gpt41Mini => "gpt-4.1-mini",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| DomainError::invalid_input(format!("Unsupported model: {}", s)))
    }
}

impl std::fmt::Display for ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validates a sampling temperature and snaps it to the slider step.
pub fn normalize_temperature(value: f32) -> Result<f32, DomainError> {
    if !value.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
        return Err(DomainError::invalid_input(format!(
            "Temperature must be between {} and {}, got {}",
            MIN_TEMPERATURE, MAX_TEMPERATURE, value
        )));
    }
    let steps_per_unit = TEMPERATURE_STEP.recip().round();
    Ok((value * steps_per_unit).round() / steps_per_unit)
}

/// Per-session configuration panel values.
///
/// Nothing here is persisted; the credential lives only as long as the
/// session that holds it.
#[derive(Clone, PartialEq)]
pub struct ChatSettings {
    api_key: Option<String>,
    model: ChatModel,
    temperature: f32,
    languages: Vec<Language>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ChatModel::default(),
            temperature: DEFAULT_TEMPERATURE,
            languages: vec![Language::DEFAULT],
        }
    }
}

impl ChatSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty or whitespace-only key clears the explicit credential.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }

    pub fn with_model(mut self, model: ChatModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, DomainError> {
        self.temperature = normalize_temperature(temperature)?;
        Ok(self)
    }

    /// Keeps selection order and drops duplicates. An empty selection is
    /// allowed; the prompt builder falls back to the default language.
    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        let mut selected: Vec<Language> = Vec::with_capacity(languages.len());
        for language in languages {
            if !selected.contains(&language) {
                selected.push(language);
            }
        }
        self.languages = selected;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> ChatModel {
        self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

impl std::fmt::Debug for ChatSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("languages", &self.languages)
            .finish()
    }
}
