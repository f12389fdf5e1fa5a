//! Error types for the chat client.

use thiserror::Error;

use crate::domain::ids::ConversationId;

/// Errors raised by the store, the session and configuration loading.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The only remaining conversation cannot be deleted.
    #[error("the last conversation cannot be deleted")]
    LastConversation,
    /// No conversation with this id.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type ChatResult<T> = Result<T, ChatError>;
