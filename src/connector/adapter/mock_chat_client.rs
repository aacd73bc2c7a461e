use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{languages_in_prompt, DomainError, Language, PendingTurn, Role};

/// Offline [`ChatClient`] that answers deterministically without a network call.
///
/// The reply has one `---`-separated section per language named in the
/// system message, each echoing the latest user question, which is enough to
/// exercise the page end to end.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }

    fn section(language: Language, question: &str) -> String {
        format!(
            "## 🧭 {}\n{}: \"{}\" (mock reply)",
            language.display_name(),
            language.code(),
            question
        )
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, turn: &PendingTurn) -> Result<String, DomainError> {
        let system = turn
            .messages()
            .iter()
            .find(|m| m.role() == Role::System)
            .map(|m| m.content())
            .unwrap_or_default();
        let question = turn
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .ok_or_else(|| DomainError::invalid_input("no user message to answer"))?;

        let mut languages = languages_in_prompt(system);
        if languages.is_empty() {
            languages.push(Language::DEFAULT);
        }

        debug!(
            "Mock completion for {} languages ({} messages)",
            languages.len(),
            turn.messages().len()
        );

        Ok(languages
            .into_iter()
            .map(|l| Self::section(l, question))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatSession, ChatSettings};

    #[tokio::test]
    async fn test_mock_reply_has_section_per_language() {
        let settings = ChatSettings::new()
            .with_api_key(Some("sk-test".to_string()))
            .with_languages(vec![Language::Korean, Language::Japanese]);
        let (_, turn) = ChatSession::start(settings)
            .begin_turn("교토 단풍 시기", None)
            .unwrap();

        let reply = MockChatClient::new().complete(&turn).await.unwrap();

        assert_eq!(reply.matches("---").count(), 1);
        assert!(reply.contains("한국어"));
        assert!(reply.contains("일본어"));
        assert!(reply.contains("교토 단풍 시기"));
    }
}
