use std::time::{SystemTime, UNIX_EPOCH};

use super::Message;
use crate::domain::DomainError;

pub const EXPORT_FILE_PREFIX: &str = "travel_chat_";
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Downloadable transcript: a pretty-printed JSON array of `{role, content}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    file_name: String,
    body: String,
}

impl ExportDocument {
    /// System messages are filtered out here as well, whatever the caller passes.
    pub fn from_messages(messages: &[Message], exported_at: u64) -> Result<Self, DomainError> {
        let visible: Vec<&Message> = messages.iter().filter(|m| !m.is_system()).collect();
        let body = serde_json::to_string_pretty(&visible)?;
        Ok(Self {
            file_name: format!("{}{}.json", EXPORT_FILE_PREFIX, exported_at),
            body,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME_TYPE
    }
}

pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
