//! In-memory conversation store.
//!
//! Invariants held by every method:
//! - at least one conversation exists;
//! - exactly one conversation is active and it is present in the list.
//!
//! Every mutation bumps a revision counter published through a
//! [`tokio::sync::watch`] channel so views can re-render.

use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::conversation::Conversation;
use crate::domain::errors::{ChatError, ChatResult};
use crate::domain::ids::ConversationId;
use crate::domain::message::Message;

/// Maximum length of a conversation name, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Collection of conversations with one active entry.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active: ConversationId,
    name_prefix: String,
    revision: watch::Sender<u64>,
}

impl ConversationStore {
    /// Create a store holding a single default conversation named `"{prefix} 1"`.
    #[must_use]
    pub fn new(name_prefix: impl Into<String>) -> Self {
        let name_prefix = name_prefix.into();
        let first = Conversation::new(format!("{name_prefix} 1"));
        let active = first.id();
        let (revision, _) = watch::channel(0);

        Self {
            conversations: vec![first],
            active,
            name_prefix,
            revision,
        }
    }

    /// Subscribe to change notifications. The value is a monotonically
    /// increasing revision number.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Name for the next conversation created without an explicit one.
    #[must_use]
    pub fn next_default_name(&self) -> String {
        format!("{} {}", self.name_prefix, self.conversations.len() + 1)
    }

    /// Append a new empty conversation and make it active.
    pub fn create_conversation(&mut self, name: impl Into<String>) -> ConversationId {
        let name = clamp_name(name.into().trim());
        let name = if name.is_empty() {
            self.next_default_name()
        } else {
            name
        };

        let conversation = Conversation::new(name);
        let id = conversation.id();
        info!("Created conversation {} ({})", conversation.name(), id.short());

        self.conversations.push(conversation);
        self.active = id;
        self.bump();
        id
    }

    /// Delete a conversation.
    ///
    /// If it was active, the first remaining conversation becomes active.
    ///
    /// # Errors
    /// `LastConversation` if it is the only one (the store is left unchanged),
    /// `ConversationNotFound` for unknown ids.
    pub fn delete_conversation(&mut self, id: ConversationId) -> ChatResult<()> {
        let index = self.index_of(id)?;
        if self.conversations.len() == 1 {
            return Err(ChatError::LastConversation);
        }

        let removed = self.conversations.remove(index);
        info!("Deleted conversation {} ({})", removed.name(), id.short());

        if self.active == id {
            self.active = self.conversations[0].id();
            debug!("Active conversation moved to {}", self.active.short());
        }

        self.bump();
        Ok(())
    }

    /// Rename a conversation. Names that trim to empty are ignored.
    ///
    /// # Errors
    /// `ConversationNotFound` for unknown ids.
    pub fn rename_conversation(&mut self, id: ConversationId, new_name: &str) -> ChatResult<()> {
        let index = self.index_of(id)?;
        let name = clamp_name(new_name.trim());
        if name.is_empty() {
            return Ok(());
        }

        debug!("Renamed conversation {} to: {}", id.short(), name);
        self.conversations[index].set_name(name);
        self.bump();
        Ok(())
    }

    /// Append a message to a conversation.
    ///
    /// # Errors
    /// `ConversationNotFound` for unknown ids.
    pub fn append_message(&mut self, id: ConversationId, message: Message) -> ChatResult<()> {
        let index = self.index_of(id)?;
        self.conversations[index].push(message);
        self.bump();
        Ok(())
    }

    /// Append a message to the active conversation and return its id.
    pub fn append_to_active(&mut self, message: Message) -> ConversationId {
        let id = self.active;
        if let Some(conversation) = self.conversations.iter_mut().find(|c| c.id() == id) {
            conversation.push(message);
            self.bump();
        }
        id
    }

    /// Make a conversation active.
    ///
    /// # Errors
    /// `ConversationNotFound` for unknown ids.
    pub fn set_active(&mut self, id: ConversationId) -> ChatResult<()> {
        self.index_of(id)?;
        if self.active != id {
            self.active = id;
            self.bump();
        }
        Ok(())
    }

    /// Identifier of the active conversation.
    #[must_use]
    pub const fn active_id(&self) -> ConversationId {
        self.active
    }

    /// The active conversation.
    #[must_use]
    pub fn active(&self) -> &Conversation {
        // The active id always refers to a stored conversation.
        self.conversations
            .iter()
            .find(|c| c.id() == self.active)
            .unwrap_or(&self.conversations[0])
    }

    /// Look up a conversation.
    #[must_use]
    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id() == id)
    }

    /// All conversations in creation order.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Number of conversations (never zero).
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Position of a conversation in the list.
    #[must_use]
    pub fn position(&self, id: ConversationId) -> Option<usize> {
        self.conversations.iter().position(|c| c.id() == id)
    }

    /// Identifier of the conversation at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ConversationId> {
        self.conversations.get(index).map(Conversation::id)
    }

    fn index_of(&self, id: ConversationId) -> ChatResult<usize> {
        self.position(id).ok_or(ChatError::ConversationNotFound(id))
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new("Chat")
    }
}

fn clamp_name(name: &str) -> String {
    name.chars().take(MAX_NAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_c1() -> ConversationStore {
        let mut store = ConversationStore::new("Chat");
        let id = store.active_id();
        store.rename_conversation(id, "C1").unwrap();
        store
    }

    #[test]
    fn test_starts_with_one_active_conversation() {
        let store = ConversationStore::default();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().name(), "Chat 1");
        assert_eq!(store.active_id(), store.conversations()[0].id());
        assert_eq!(store.next_default_name(), "Chat 2");
    }

    #[test]
    fn test_create_then_delete_scenario() {
        let mut store = store_with_c1();
        let c1 = store.active_id();

        let c2 = store.create_conversation("C2");
        assert_eq!(store.len(), 2);
        assert_eq!(store.active_id(), c2);
        assert_eq!(store.active().name(), "C2");

        store.delete_conversation(c2).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_id(), c1);
        assert_eq!(store.active().name(), "C1");
    }

    #[test]
    fn test_delete_last_conversation_is_rejected() {
        let mut store = store_with_c1();
        let only = store.active_id();
        let revision = store.revision();

        let err = store.delete_conversation(only).unwrap_err();
        assert!(matches!(err, ChatError::LastConversation));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert_eq!(store.active_id(), only);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_delete_active_activates_first_remaining() {
        let mut store = store_with_c1();
        let c1 = store.active_id();
        let c2 = store.create_conversation("C2");
        let c3 = store.create_conversation("C3");
        store.set_active(c2).unwrap();

        store.delete_conversation(c2).unwrap();
        assert_eq!(store.active_id(), c1);
        assert!(store.get(c2).is_none());
        assert_eq!(store.position(c3), Some(1));
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let mut store = store_with_c1();
        let c1 = store.active_id();
        let c2 = store.create_conversation("C2");

        store.delete_conversation(c1).unwrap();
        assert_eq!(store.active_id(), c2);
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let mut store = ConversationStore::default();
        let ghost = ConversationId::new();
        assert!(matches!(
            store.set_active(ghost),
            Err(ChatError::ConversationNotFound(id)) if id == ghost
        ));
        assert!(store.delete_conversation(ghost).is_err());
        assert!(store.append_message(ghost, Message::user("x")).is_err());
    }

    #[test]
    fn test_rename_ignores_blank_and_trims() {
        let mut store = store_with_c1();
        let id = store.active_id();

        store.rename_conversation(id, "   ").unwrap();
        assert_eq!(store.active().name(), "C1");

        store.rename_conversation(id, "  Weekend plans  ").unwrap();
        assert_eq!(store.active().name(), "Weekend plans");

        let long = "x".repeat(80);
        store.rename_conversation(id, &long).unwrap();
        assert_eq!(store.active().name().chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_create_with_blank_name_uses_default() {
        let mut store = ConversationStore::default();
        store.create_conversation("  ");
        assert_eq!(store.active().name(), "Chat 2");
    }

    #[test]
    fn test_append_message_and_notify() {
        let mut store = ConversationStore::default();
        let rx = store.subscribe();
        let before = *rx.borrow();

        let id = store.active_id();
        store.append_message(id, Message::user("hello")).unwrap();

        assert_eq!(store.active().messages().len(), 1);
        assert!(*rx.borrow() > before);
    }
}
