//! Sidebar: one row per conversation with a preview of its last message.

use chrono::Local;

use crate::domain::config::UiStrings;
use crate::domain::conversation::Conversation;
use crate::store::ConversationStore;

/// Ellipsis appended to truncated previews.
pub const ELLIPSIS: &str = "...";

/// Cut `text` to `budget` characters, appending an ellipsis when shortened.
#[must_use]
pub fn truncate_preview(text: &str, budget: usize) -> String {
    if text.chars().count() > budget {
        let mut cut: String = text.chars().take(budget).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text.to_string()
    }
}

/// Preview of a conversation's last message, prefixed by its author tag.
#[must_use]
pub fn preview(conversation: &Conversation, budget: usize, strings: &UiStrings) -> String {
    conversation.last_message().map_or_else(
        || strings.no_messages.clone(),
        |last| {
            let flat = last.text().replace(['\r', '\n'], " ");
            format!("{}: {}", last.author().label(), truncate_preview(&flat, budget))
        },
    )
}

/// Render every conversation as a sidebar row. The active one is marked `>`.
#[must_use]
pub fn render_sidebar(store: &ConversationStore, budget: usize, strings: &UiStrings) -> Vec<String> {
    store
        .conversations()
        .iter()
        .enumerate()
        .map(|(index, conversation)| {
            let marker = if conversation.id() == store.active_id() {
                '>'
            } else {
                ' '
            };
            format!(
                "{marker} {}. {} [{}] {}",
                index + 1,
                conversation.name(),
                conversation.created_at().with_timezone(&Local).format("%H:%M"),
                preview(conversation, budget, strings)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::Message;

    #[test]
    fn test_forty_chars_truncate_to_thirty_plus_ellipsis() {
        let text = "a".repeat(40);
        let cut = truncate_preview(&text, 30);
        assert_eq!(cut, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_preview("hello", 30), "hello");
        assert_eq!(truncate_preview(&"b".repeat(30), 30), "b".repeat(30));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let text = "é".repeat(31);
        assert_eq!(truncate_preview(&text, 30), format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_preview_prefixes_author() {
        let strings = UiStrings::default();
        let mut store = ConversationStore::default();
        let id = store.active_id();
        assert_eq!(preview(store.active(), 30, &strings), "No messages");

        store.append_message(id, Message::user("hello")).unwrap();
        assert_eq!(preview(store.active(), 30, &strings), "You: hello");

        store
            .append_message(id, Message::agent("line one\nline two", None))
            .unwrap();
        assert_eq!(preview(store.active(), 30, &strings), "AI: line one line two");
    }

    #[test]
    fn test_sidebar_marks_active_row() {
        let strings = UiStrings::default();
        let mut store = ConversationStore::default();
        store.create_conversation("Second");

        let rows = render_sidebar(&store, 30, &strings);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("  1. Chat 1"));
        assert!(rows[1].starts_with("> 2. Second"));
        assert!(rows[1].ends_with("No messages"));
    }
}
