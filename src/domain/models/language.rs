use serde::{Deserialize, Serialize};

/// A language the assistant can answer in.
///
/// Serialized by its display name (the label shown in the language picker);
/// the ISO code is accepted as an alias on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "한국어", alias = "ko")]
    Korean,
    #[serde(rename = "영어", alias = "en")]
    English,
    #[serde(rename = "일본어", alias = "ja")]
    Japanese,
    #[serde(rename = "중국어", alias = "zh")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Korean,
        Language::English,
        Language::Japanese,
        Language::Chinese,
    ];

    /// Used by the prompt builder when nothing is selected.
    pub const DEFAULT: Language = Language::Korean;

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.display_name() == name || l.code().eq_ignore_ascii_case(name))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Korean => "한국어",
            Language::English => "영어",
            Language::Japanese => "일본어",
            Language::Chinese => "중국어",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
            Language::Japanese => "ja",
            Language::Chinese => "zh",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
