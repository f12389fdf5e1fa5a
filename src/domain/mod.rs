//! Core types: identifiers, messages, conversations, errors and configuration.

pub mod config;
pub mod conversation;
pub mod errors;
pub mod ids;
pub mod message;

pub use config::{BackendMode, ClientConfig, ServerConfig, UiStrings};
pub use conversation::Conversation;
pub use errors::{ChatError, ChatResult};
pub use ids::{ConversationId, MessageId};
pub use message::{Author, Message, Persona};
