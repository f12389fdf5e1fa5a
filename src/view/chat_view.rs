//! Chat area: the active conversation's messages and the typing indicator.

use chrono::Local;

use crate::domain::message::Message;
use crate::session::{ChatSession, PipelineState};

/// Render one message. Continuation lines are indented under the first.
#[must_use]
pub fn render_message(message: &Message) -> Vec<String> {
    let time = message.timestamp().with_timezone(&Local).format("%H:%M");
    let mut tag = message.author().label().to_string();
    if message.is_error() {
        tag.push_str(" (!)");
    }

    let mut lines: Vec<String> = Vec::new();
    for (i, line) in message.text().lines().enumerate() {
        if i == 0 {
            lines.push(format!("[{time}] {tag}: {line}"));
        } else {
            lines.push(format!("        {line}"));
        }
    }
    if lines.is_empty() {
        lines.push(format!("[{time}] {tag}:"));
    }

    if let Some(persona) = message.persona() {
        if let Some(last) = lines.last_mut() {
            last.push_str(&format!(" ({persona})"));
        }
    }

    lines
}

/// Render the header line of the active conversation.
#[must_use]
pub fn render_header(session: &ChatSession) -> String {
    let active = session.store().active();
    let persona = session
        .persona()
        .map_or_else(String::new, |p| format!(" | persona: {p}"));
    format!(
        "== {} ({} messages){} ==",
        active.name(),
        active.messages().len(),
        persona
    )
}

/// Render every line of the chat area for the active conversation.
#[must_use]
pub fn render_chat(session: &ChatSession) -> Vec<String> {
    let active = session.store().active();
    let mut lines: Vec<String> = active.messages().iter().flat_map(render_message).collect();

    if lines.is_empty() {
        lines.push(session.strings().empty_state.clone());
    }

    if let PipelineState::Pending { conversation, .. } = session.state() {
        if conversation == active.id() {
            lines.push(session.strings().typing.clone());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ClientConfig;
    use crate::domain::message::Persona;

    #[test]
    fn test_render_message_tags() {
        let user = render_message(&Message::user("hello"));
        assert_eq!(user.len(), 1);
        assert!(user[0].ends_with("You: hello"));

        let failed = render_message(&Message::agent_error("offline"));
        assert!(failed[0].ends_with("AI (!): offline"));

        let styled = render_message(&Message::agent("two\nlines", Some(Persona::Friend)));
        assert_eq!(styled.len(), 2);
        assert_eq!(styled[1], "        lines (friend)");
    }

    #[test]
    fn test_empty_conversation_shows_hint() {
        let session = ChatSession::new(&ClientConfig::default());
        let lines = render_chat(&session);
        assert_eq!(lines, vec![session.strings().empty_state.clone()]);
        assert_eq!(render_header(&session), "== Chat 1 (0 messages) ==");
    }

    #[test]
    fn test_typing_indicator_only_in_pending_conversation() {
        let mut session = ChatSession::new(&ClientConfig::default());
        session.begin_send("hello").unwrap();

        let lines = render_chat(&session);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], session.strings().typing);

        session.store_mut().create_conversation("Other");
        let lines = render_chat(&session);
        assert_eq!(lines, vec![session.strings().empty_state.clone()]);
    }
}
