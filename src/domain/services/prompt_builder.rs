use crate::domain::Language;

/// Separator placed between language names inside the instruction.
pub const LANGUAGE_SEPARATOR: &str = ", ";

/// Builds the system instruction for a set of answer languages.
///
/// An empty selection falls back to [`Language::DEFAULT`]. The fixed parts of
/// the template never name a language, so the output references exactly the
/// selected ones.
pub fn build_system_prompt(languages: &[Language]) -> String {
    let langs = if languages.is_empty() {
        Language::DEFAULT.display_name().to_string()
    } else {
        languages
            .iter()
            .map(|l| l.display_name())
            .collect::<Vec<_>>()
            .join(LANGUAGE_SEPARATOR)
    };

    format!(
        "당신은 여행에 관한 질문에 답하는 챗봇입니다. \
         여행지 추천, 준비물, 문화, 음식 등 다양한 주제에 대해 친절하게 안내해 주세요. \
         모든 답변은 다음 언어로 동시에 제공하세요: {langs}. \
         각 언어는 제목 이모지와 함께 구분된 섹션(---)으로 나누어 주세요. \
         간결하되 핵심 정보(예산 범위, 계절, 교통수단, 로컬 팁)를 포함하세요."
    )
}

/// Recovers the answer languages named in a prompt built by [`build_system_prompt`].
pub fn languages_in_prompt(prompt: &str) -> Vec<Language> {
    Language::ALL
        .into_iter()
        .filter(|l| prompt.contains(l.display_name()))
        .collect()
}
