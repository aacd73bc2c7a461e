use crate::domain::{Message, Role};

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders one message as a chat bubble. System messages render to nothing.
pub fn render_message(message: &Message) -> Option<String> {
    let (bubble_class, icon, who) = match message.role() {
        Role::System => return None,
        Role::User => ("user", "👤", "나"),
        Role::Assistant => ("assistant", "🤖", "어시스턴트"),
    };

    Some(format!(
        r#"<div class="chat-bubble {bubble_class}">
  <div class="role"><span class="icon">{icon}</span>{who}</div>
  <div class="content">{content}</div>
</div>
"#,
        content = escape_html(message.content())
    ))
}

/// Renders every visible message of a transcript, in order.
pub fn render_transcript(messages: &[Message]) -> String {
    messages.iter().filter_map(render_message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_is_hidden() {
        assert!(render_message(&Message::system("secret instructions")).is_none());
    }

    #[test]
    fn user_and_assistant_get_distinct_labels() {
        let user = render_message(&Message::user("hi")).unwrap();
        let assistant = render_message(&Message::assistant("hello")).unwrap();

        assert!(user.contains("chat-bubble user"));
        assert!(user.contains("👤") && user.contains("나"));
        assert!(assistant.contains("chat-bubble assistant"));
        assert!(assistant.contains("🤖") && assistant.contains("어시스턴트"));
    }

    #[test]
    fn content_is_escaped() {
        let html = render_message(&Message::user("<script>alert('x')</script> & co")).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn transcript_skips_system_and_keeps_order() {
        let html = render_transcript(&[
            Message::system("sys"),
            Message::user("first"),
            Message::assistant("second"),
        ]);
        assert!(!html.contains("sys"));
        assert_eq!(html.matches("chat-bubble").count(), 2);
        assert!(html.find("first").unwrap() < html.find("second").unwrap());
    }
}
