//! Conversation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::ConversationId;
use crate::domain::message::Message;

/// Named, ordered sequence of messages.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    name: String,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create an empty conversation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ConversationId::new(),
            name: name.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}
