//! Session state and the send pipeline.
//!
//! [`ChatSession`] owns everything that lives for one client run: the
//! conversation store, the draft input, an in-progress rename and the
//! pipeline state. It is created at startup and dropped on exit.

pub mod pipeline;

pub use pipeline::{IgnoreReason, PendingSend, SendOutcome, SendPipeline};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::backend::ChatRequest;
use crate::domain::config::{ClientConfig, UiStrings};
use crate::domain::errors::{ChatError, ChatResult};
use crate::domain::ids::ConversationId;
use crate::domain::message::{Message, Persona};
use crate::store::ConversationStore;

/// Send pipeline state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PipelineState {
    /// No request in flight.
    Idle,
    /// A request is in flight for `conversation`.
    Pending {
        /// Conversation the reply will be appended to.
        conversation: ConversationId,
        /// When the request started.
        since: DateTime<Utc>,
    },
}

/// Rename in progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenameDraft {
    /// Conversation being renamed.
    pub conversation: ConversationId,
    /// Edited name.
    pub buffer: String,
}

/// Ephemeral state of one chat session.
pub struct ChatSession {
    store: ConversationStore,
    draft: String,
    rename: Option<RenameDraft>,
    state: PipelineState,
    persona: Option<Persona>,
    strings: UiStrings,
}

impl ChatSession {
    /// Start a session with one default conversation.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            store: ConversationStore::new(config.strings.default_name_prefix.clone()),
            draft: String::new(),
            rename: None,
            state: PipelineState::Idle,
            persona: config.persona,
            strings: config.strings.clone(),
        }
    }

    /// Conversation store.
    #[must_use]
    pub const fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Mutable conversation store.
    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    /// UI strings in use.
    #[must_use]
    pub const fn strings(&self) -> &UiStrings {
        &self.strings
    }

    /// Current draft input.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft input.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Selected persona tag.
    #[must_use]
    pub const fn persona(&self) -> Option<Persona> {
        self.persona
    }

    /// Select or clear the persona tag.
    pub fn set_persona(&mut self, persona: Option<Persona>) {
        self.persona = persona;
    }

    /// Pipeline state.
    #[must_use]
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, PipelineState::Pending { .. })
    }

    /// Whether a send would currently be accepted with the draft as input.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.is_pending() && !self.draft.trim().is_empty()
    }

    /// Start renaming a conversation, seeding the buffer with its name.
    ///
    /// # Errors
    /// `ConversationNotFound` for unknown ids.
    pub fn begin_rename(&mut self, conversation: ConversationId) -> ChatResult<()> {
        let name = self
            .store
            .get(conversation)
            .map(|c| c.name().to_string())
            .ok_or(ChatError::ConversationNotFound(conversation))?;
        self.rename = Some(RenameDraft {
            conversation,
            buffer: name,
        });
        Ok(())
    }

    /// Rename in progress, if any.
    #[must_use]
    pub const fn rename_draft(&self) -> Option<&RenameDraft> {
        self.rename.as_ref()
    }

    /// Replace the rename buffer. Ignored when no rename is in progress.
    pub fn set_rename_buffer(&mut self, text: impl Into<String>) {
        if let Some(rename) = self.rename.as_mut() {
            rename.buffer = text.into();
        }
    }

    /// Apply the rename in progress. A blank buffer leaves the name untouched.
    ///
    /// # Errors
    /// `ConversationNotFound` if the conversation was deleted meanwhile.
    pub fn commit_rename(&mut self) -> ChatResult<()> {
        match self.rename.take() {
            Some(rename) => self
                .store
                .rename_conversation(rename.conversation, &rename.buffer),
            None => Ok(()),
        }
    }

    /// Drop the rename in progress.
    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Validate input, append the user message and move to `Pending`.
    pub(crate) fn begin_send(
        &mut self,
        text: &str,
    ) -> Result<(ConversationId, ChatRequest), IgnoreReason> {
        if text.trim().is_empty() {
            return Err(IgnoreReason::EmptyInput);
        }
        if self.is_pending() {
            return Err(IgnoreReason::Pending);
        }

        let conversation = self.store.append_to_active(Message::user(text));
        self.draft.clear();
        self.state = PipelineState::Pending {
            conversation,
            since: Utc::now(),
        };
        debug!("Pending reply for conversation {}", conversation.short());

        Ok((conversation, ChatRequest::new(text, self.persona)))
    }

    /// Append the reply (or fallback) and return to `Idle`.
    ///
    /// Returns `false` when the target conversation no longer exists.
    pub(crate) fn finish_send(&mut self, conversation: ConversationId, reply: Message) -> bool {
        if let PipelineState::Pending { since, .. } = self.state {
            let waited = Utc::now().signed_duration_since(since);
            debug!(
                "Reply for conversation {} after {} ms",
                conversation.short(),
                waited.num_milliseconds()
            );
        }
        self.state = PipelineState::Idle;
        self.store.append_message(conversation, reply).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_send_rejects_blank_input() {
        let mut session = ChatSession::new(&ClientConfig::default());
        assert_eq!(session.begin_send("   \n").unwrap_err(), IgnoreReason::EmptyInput);
        assert!(session.store().active().messages().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_begin_send_clears_draft_and_goes_pending() {
        let mut session = ChatSession::new(&ClientConfig::default());
        session.set_draft("hello");
        assert!(session.can_send());

        let (conversation, request) = session.begin_send("hello").unwrap();
        assert_eq!(conversation, session.store().active_id());
        assert_eq!(request.message, "hello");
        assert!(session.draft().is_empty());
        assert!(matches!(
            session.state(),
            PipelineState::Pending { conversation: c, since } if c == conversation && since <= Utc::now()
        ));
        assert_eq!(session.begin_send("again").unwrap_err(), IgnoreReason::Pending);
    }

    #[test]
    fn test_rename_flow() {
        let mut session = ChatSession::new(&ClientConfig::default());
        let id = session.store().active_id();

        session.begin_rename(id).unwrap();
        assert_eq!(session.rename_draft().map(|r| r.buffer.as_str()), Some("Chat 1"));

        session.set_rename_buffer("  ");
        session.commit_rename().unwrap();
        assert_eq!(session.store().active().name(), "Chat 1");

        session.begin_rename(id).unwrap();
        session.set_rename_buffer("Holidays");
        session.cancel_rename();
        assert_eq!(session.store().active().name(), "Chat 1");

        session.begin_rename(id).unwrap();
        session.set_rename_buffer("Holidays");
        session.commit_rename().unwrap();
        assert_eq!(session.store().active().name(), "Holidays");
        assert!(session.rename_draft().is_none());
    }
}
