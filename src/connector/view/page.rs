use crate::domain::{ChatModel, ChatSession, Language, SessionPhase, MAX_TEMPERATURE, MIN_TEMPERATURE, TEMPERATURE_STEP};

use super::{escape_html, render_transcript};

pub const PAGE_TITLE: &str = "여행용 챗봇과 대화하기";
pub const CREDENTIAL_WARNING: &str = "🔑 좌측 사이드바에서 OpenAI API 키를 입력하세요.";
pub const CHAT_PLACEHOLDER: &str =
    "여행에 대해 무엇이든 물어보세요 (예: 오사카 3박 4일 코스, 10월 유럽 날씨, 저예산 맛집)";
pub const SPINNER_TEXT: &str = "답변 생성 중...";
pub const EXPORT_CAPTION: &str = "💡 시스템 프롬프트는 제외된 대화만 저장됩니다.";
pub const FOOTER_TIP: &str =
    "💡 팁: 사이드바에서 언어를 여러 개 선택하면 응답이 언어별 섹션으로 정리되어 출력돼요.";

const STYLE: &str = r#"
html, body { font-family: "Pretendard", -apple-system, BlinkMacSystemFont, Inter, "Segoe UI", Roboto, "Noto Sans KR", "Apple SD Gothic Neo", "Malgun Gothic", "Helvetica Neue", Arial, sans-serif; margin: 0; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 300px; padding: 20px; border-right: 1px solid rgba(0,0,0,0.06); background: #f8fafc; box-sizing: border-box; }
.sidebar label { display: block; font-size: 13px; font-weight: 600; margin: 12px 0 4px; }
.sidebar input[type=password], .sidebar select { width: 100%; box-sizing: border-box; padding: 6px; }
.sidebar .actions { display: flex; gap: 8px; margin-top: 16px; }
.main { flex: 1; max-width: 880px; padding: 20px; box-sizing: border-box; }
.app-header { background: linear-gradient(135deg, #0ea5e9 0%, #6366f1 60%, #a855f7 100%); color: white; padding: 22px; border-radius: 18px; box-shadow: 0 10px 24px rgba(36, 37, 47, 0.25); margin-bottom: 16px; }
.app-header h1 { margin: 0 0 4px 0; font-weight: 800; letter-spacing: -0.02em; }
.app-header .sub { opacity: 0.92; font-size: 14.5px; }
.chat-bubble { padding: 14px 16px; border-radius: 16px; margin: 8px 0; line-height: 1.55; }
.chat-bubble .content { white-space: pre-wrap; }
.user { background: #111827; color: #f9fafb; border: 1px solid rgba(255,255,255,0.06); }
.assistant { background: #1118270d; border: 1px solid #e5e7eb; }
.role { font-size: 13px; font-weight: 700; margin-bottom: 4px; opacity: 0.7; display: flex; align-items: center; gap: 8px; }
.role .icon { width: 22px; height: 22px; display: inline-flex; align-items: center; justify-content: center; }
.warning { background: #fef9c3; border: 1px solid #facc15; padding: 12px 14px; border-radius: 12px; }
.spinner { display: none; opacity: 0.7; margin: 8px 0; }
.spinner.active { display: block; }
.chat-form { display: flex; gap: 8px; margin-top: 12px; }
.chat-form input { flex: 1; padding: 10px; border-radius: 10px; border: 1px solid #d1d5db; }
.footer-tip, .caption { opacity: 0.7; font-size: 12.5px; margin-top: 4px; }
.sysbox { background: #0f172a; color: #e2e8f0; border: 1px solid #334155; padding: 10px 12px; border-radius: 12px; font-size: 12.8px; line-height: 1.4; }
"#;

const SCRIPT: &str = r#"
const api = `/api/sessions/${document.body.dataset.session}`;

async function send(method, path, body) {
  const init = { method, headers: {} };
  if (body !== undefined) {
    init.headers['content-type'] = 'application/json';
    init.body = JSON.stringify(body);
  }
  const response = await fetch(api + path, init);
  const json = await response.json().catch(() => ({}));
  if (!response.ok) {
    throw new Error(json.error ? json.error.message : response.statusText);
  }
  return json.data;
}

document.getElementById('settings-form').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.target;
  const body = {
    model: form.model.value,
    temperature: parseFloat(form.temperature.value),
    languages: [...form.querySelectorAll('input[name=languages]:checked')].map((i) => i.value),
  };
  if (form.api_key.value) body.api_key = form.api_key.value;
  try { await send('PUT', '/settings', body); location.reload(); } catch (e) { alert(e.message); }
});

document.getElementById('temperature').addEventListener('input', (event) => {
  document.getElementById('temperature-value').textContent = Number(event.target.value).toFixed(1);
});

document.getElementById('reset').addEventListener('click', async () => {
  try { await send('POST', '/reset'); location.reload(); } catch (e) { alert(e.message); }
});

const chatForm = document.getElementById('chat-form');
if (chatForm) {
  chatForm.addEventListener('submit', async (event) => {
    event.preventDefault();
    const input = chatForm.prompt;
    const text = input.value;
    if (!text.trim()) return;
    const transcript = document.getElementById('transcript');
    const spinner = document.getElementById('spinner');

    const pending = document.createElement('div');
    pending.className = 'chat-bubble user';
    const role = document.createElement('div');
    role.className = 'role';
    role.innerHTML = '<span class="icon">👤</span>나';
    const content = document.createElement('div');
    content.className = 'content';
    content.textContent = text;
    pending.append(role, content);
    transcript.appendChild(pending);

    input.value = '';
    input.disabled = true;
    spinner.classList.add('active');
    try {
      const turn = await send('POST', '/messages', { content: text });
      pending.outerHTML = turn.user.html;
      if (turn.appended) transcript.insertAdjacentHTML('beforeend', turn.assistant.html);
    } catch (e) {
      pending.remove();
      alert(e.message);
    } finally {
      spinner.classList.remove('active');
      input.disabled = false;
      input.focus();
    }
  });
}
"#;

fn model_options(selected: ChatModel) -> String {
    ChatModel::ALL
        .iter()
        .map(|m| {
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                m.as_str(),
                if *m == selected { " selected" } else { "" }
            )
        })
        .collect()
}

fn language_checkboxes(selected: &[Language]) -> String {
    Language::ALL
        .iter()
        .map(|l| {
            format!(
                r#"<div><input type="checkbox" name="languages" value="{0}" id="lang-{1}"{2}> <label for="lang-{1}" style="display:inline">{0}</label></div>"#,
                l.display_name(),
                l.code(),
                if selected.contains(l) { " checked" } else { "" }
            )
        })
        .collect()
}

/// Full page for one session: sidebar settings, transcript and chat input.
///
/// The chat input only appears while the session is idle: without a
/// credential it is replaced by a warning, and while a reply is pending by
/// the busy indicator.
pub fn render_page(session: &ChatSession, phase: SessionPhase) -> String {
    let settings = session.settings();
    let export_url = format!("/api/sessions/{}/export", session.id());

    let chat_area = match phase {
        SessionPhase::AwaitingCredential => {
            format!(r#"<div class="warning">{}</div>"#, CREDENTIAL_WARNING)
        }
        SessionPhase::AwaitingResponse => {
            format!(r#"<div class="spinner active">⏳ {SPINNER_TEXT}</div>"#)
        }
        SessionPhase::Idle => format!(
            r#"<div id="spinner" class="spinner">⏳ {SPINNER_TEXT}</div>
<form id="chat-form" class="chat-form">
  <input name="prompt" autocomplete="off" placeholder="{placeholder}">
  <button type="submit">전송</button>
</form>"#,
            placeholder = escape_html(CHAT_PLACEHOLDER)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>🧭 {PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body data-session="{id}" data-phase="{phase}">
<div class="layout">
<aside class="sidebar">
  <h3>⚙️ 설정</h3>
  <form id="settings-form">
    <label for="api_key">OpenAI API 키</label>
    <input type="password" id="api_key" name="api_key" placeholder="{key_hint}" title="환경변수 OPENAI_API_KEY도 인식합니다.">
    <label for="model">모델 선택</label>
    <select id="model" name="model">{models}</select>
    <label for="temperature">창의성 (temperature): <span id="temperature-value">{temperature:.1}</span></label>
    <input type="range" id="temperature" name="temperature" min="{min_t}" max="{max_t}" step="{step_t}" value="{temperature:.1}">
    <label>지원할 언어</label>
    {languages}
    <div class="actions"><button type="submit">적용</button></div>
  </form>
  <details>
    <summary>🧠 시스템 프롬프트 미리보기</summary>
    <div class="sysbox">{preview}</div>
  </details>
  <div class="actions">
    <button type="button" id="reset">🧹 초기화</button>
    <a href="{export_url}" download><button type="button">💾 내보내기</button></a>
  </div>
  <div class="caption">{EXPORT_CAPTION}</div>
</aside>
<main class="main">
  <div class="app-header">
    <h1>🧭 여행용 멀티링구얼 챗봇</h1>
    <div class="sub">여행지 추천 · 준비물 · 문화 · 음식까지 — 여러 언어로 한 번에 답해드려요.</div>
  </div>
  <div id="transcript">
{transcript}  </div>
  {chat_area}
  <div class="footer-tip">{FOOTER_TIP}</div>
</main>
</div>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        id = session.id(),
        phase = phase.as_str(),
        key_hint = if settings.has_api_key() { "••••••••" } else { "sk-..." },
        models = model_options(settings.model()),
        temperature = settings.temperature(),
        min_t = MIN_TEMPERATURE,
        max_t = MAX_TEMPERATURE,
        step_t = TEMPERATURE_STEP,
        languages = language_checkboxes(settings.languages()),
        preview = escape_html(&session.system_prompt_preview()),
        transcript = render_transcript(session.conversation().messages()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::render_message;
    use crate::domain::{ChatSettings, Message, Role};

    #[test]
    fn page_without_credential_shows_warning_and_no_input() {
        let session = ChatSession::start(ChatSettings::new());
        let html = render_page(&session, SessionPhase::AwaitingCredential);

        assert!(html.contains(CREDENTIAL_WARNING));
        assert!(!html.contains(r#"id="chat-form""#));
    }

    #[test]
    fn page_hides_system_message_but_previews_prompt() {
        let settings = ChatSettings::new().with_api_key(Some("sk-test".to_string()));
        let (session, turn) = ChatSession::start(settings)
            .begin_turn("부산 맛집", None)
            .unwrap();
        let (session, _) = session.complete_turn(&turn, "돼지국밥".to_string());

        let html = render_page(&session, SessionPhase::Idle);

        assert!(html.contains(r#"id="chat-form""#));
        assert!(html.contains("부산 맛집"));
        assert!(html.contains("돼지국밥"));
        assert_eq!(html.matches("<div class=\"chat-bubble").count(), 2);
        assert!(html.contains("시스템 프롬프트 미리보기"));
        assert_eq!(session.conversation().messages()[0].role(), Role::System);
    }

    #[test]
    fn page_marks_selected_model_and_languages() {
        let settings = ChatSettings::new()
            .with_model(ChatModel::Gpt4o)
            .with_languages(vec![Language::English]);
        let html = render_page(&ChatSession::start(settings), SessionPhase::AwaitingCredential);

        assert!(html.contains(r#"<option value="gpt-4o" selected>"#));
        assert!(html.contains(r#"value="영어" id="lang-en" checked"#));
        assert!(!html.contains(r#"id="lang-ko" checked"#));
    }

    #[test]
    fn pending_bubble_matches_rendered_user_bubble() {
        let role_row = r#"<span class="icon">👤</span>나"#;
        let rendered = render_message(&Message::user("hi")).unwrap();

        assert!(rendered.contains(&format!(r#"<div class="role">{}</div>"#, role_row)));
        assert!(SCRIPT.contains(&format!("role.innerHTML = '{}';", role_row)));
        assert!(SCRIPT.contains("role.className = 'role';"));
        assert!(SCRIPT.contains("content.className = 'content';"));
    }
}
