//! Message model: one turn of dialogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ids::MessageId;

/// Author of a message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    /// Typed by the person at the keyboard.
    User,
    /// Produced by the chat backend (or the fallback on failure).
    Agent,
}

impl Author {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }

    /// Tag shown in front of message text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Agent => "AI",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversation style tag sent as `user_type`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Casual student register.
    Student,
    /// Formal lecturer register.
    Professor,
    /// Close friend register.
    Friend,
    /// Manager register.
    Boss,
}

impl Persona {
    /// All personas, in menu order.
    pub const ALL: [Self; 4] = [Self::Student, Self::Professor, Self::Friend, Self::Boss];

    /// Wire form of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
            Self::Friend => "friend",
            Self::Boss => "boss",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|persona| persona.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| value.to_string())
    }
}

/// A single immutable chat message.
///
/// Fields are private; a message never changes after construction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    author: Author,
    timestamp: DateTime<Utc>,
    is_error: bool,
    persona: Option<Persona>,
}

impl Message {
    /// Build a message typed by the user.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            author: Author::User,
            timestamp: Utc::now(),
            is_error: false,
            persona: None,
        }
    }

    /// Build a reply from the backend.
    #[must_use]
    pub fn agent(text: impl Into<String>, persona: Option<Persona>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            author: Author::Agent,
            timestamp: Utc::now(),
            is_error: false,
            persona,
        }
    }

    /// Build the agent-side bubble shown when delivery failed.
    #[must_use]
    pub fn agent_error(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            author: Author::Agent,
            timestamp: Utc::now(),
            is_error: true,
            persona: None,
        }
    }

    /// Message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Who wrote it.
    #[must_use]
    pub const fn author(&self) -> Author {
        self.author
    }

    /// Convenience for `author() == Author::User`.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.author, Author::User)
    }

    /// Creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether this is a delivery-failure bubble.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }

    /// Persona active when the reply was produced.
    #[must_use]
    pub const fn persona(&self) -> Option<Persona> {
        self.persona
    }
}
