//! Send pipeline: one outbound request at a time, no retry, failures shown
//! as an error bubble.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::backend::{ChatBackend, ChatRequest};
use crate::domain::ids::ConversationId;
use crate::domain::message::Message;

use super::ChatSession;

/// Why a send was not attempted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IgnoreReason {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// A request is already in flight.
    Pending,
}

/// Result of one send.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SendOutcome {
    /// The reply was appended.
    Delivered(ConversationId),
    /// Delivery failed; the fallback bubble was appended.
    Failed {
        /// Conversation that received the fallback.
        conversation: ConversationId,
        /// Underlying failure, for logs and diagnostics.
        reason: String,
    },
    /// The target conversation was deleted before the reply arrived.
    Discarded(ConversationId),
    /// Nothing was sent.
    Ignored(IgnoreReason),
}

/// A send that passed validation: the user message is already in the store
/// and the pipeline is `Pending` until [`SendPipeline::finish`] runs.
#[derive(Debug)]
#[must_use = "a started send keeps the pipeline pending until finished"]
pub struct PendingSend {
    conversation: ConversationId,
    request: ChatRequest,
}

impl PendingSend {
    /// Conversation the reply will be appended to.
    pub const fn conversation(&self) -> ConversationId {
        self.conversation
    }
}

/// Drives sends for a shared session.
///
/// The session lock is released while the request is in flight so the
/// session can be rendered and edited meanwhile.
#[derive(Clone)]
pub struct SendPipeline {
    session: Arc<Mutex<ChatSession>>,
    backend: Arc<dyn ChatBackend>,
}

impl SendPipeline {
    /// Create a pipeline over a session and a backend.
    #[must_use]
    pub fn new(session: Arc<Mutex<ChatSession>>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { session, backend }
    }

    /// Shared session handle.
    #[must_use]
    pub const fn session(&self) -> &Arc<Mutex<ChatSession>> {
        &self.session
    }

    /// Send the current draft input.
    pub async fn submit_draft(&self) -> SendOutcome {
        let started = {
            let mut session = self.session.lock().await;
            let draft = session.draft().to_string();
            Self::start_locked(&mut session, &draft)
        };
        self.resolve(started).await
    }

    /// Send `text` to the active conversation.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let started = self.start(text).await;
        self.resolve(started).await
    }

    /// Validate `text`, append the user message and move to `Pending`.
    ///
    /// Everything happens under one lock acquisition, so two calls in a row
    /// can never both be accepted.
    ///
    /// # Errors
    /// Returns the reason when nothing was sent.
    pub async fn start(&self, text: &str) -> Result<PendingSend, IgnoreReason> {
        let mut session = self.session.lock().await;
        Self::start_locked(&mut session, text)
    }

    /// Issue the request of a started send and append its reply.
    pub async fn finish(&self, pending: PendingSend) -> SendOutcome {
        let PendingSend {
            conversation,
            request,
        } = pending;

        let result = self.backend.send(&request).await;

        let mut session = self.session.lock().await;
        let (reply, outcome) = match result {
            Ok(reply) => (
                Message::agent(reply.response, request.user_type),
                SendOutcome::Delivered(conversation),
            ),
            Err(err) => {
                warn!("Delivery via {} failed: {}", self.backend.name(), err);
                (
                    Message::agent_error(session.strings().delivery_failed.clone()),
                    SendOutcome::Failed {
                        conversation,
                        reason: err.to_string(),
                    },
                )
            }
        };

        if !session.finish_send(conversation, reply) {
            info!(
                "Conversation {} was deleted before its reply arrived",
                conversation.short()
            );
            return SendOutcome::Discarded(conversation);
        }

        outcome
    }

    fn start_locked(session: &mut ChatSession, text: &str) -> Result<PendingSend, IgnoreReason> {
        session
            .begin_send(text)
            .map(|(conversation, request)| PendingSend {
                conversation,
                request,
            })
    }

    async fn resolve(&self, started: Result<PendingSend, IgnoreReason>) -> SendOutcome {
        match started {
            Ok(pending) => self.finish(pending).await,
            Err(reason) => SendOutcome::Ignored(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::backend::{ChatReply, DeliveryError};
    use crate::domain::config::ClientConfig;
    use crate::domain::message::{Author, Persona};

    struct FixedBackend(Option<&'static str>);

    #[async_trait]
    impl ChatBackend for FixedBackend {
        async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
            match self.0 {
                Some(text) => Ok(ChatReply {
                    response: text.to_string(),
                }),
                None => Err(DeliveryError::Status(503)),
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    /// Holds every request until released.
    struct GatedBackend {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ChatBackend for GatedBackend {
        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
            self.gate.notified().await;
            Ok(ChatReply {
                response: format!("re: {}", request.message),
            })
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    fn pipeline(backend: impl ChatBackend + 'static) -> SendPipeline {
        let session = Arc::new(Mutex::new(ChatSession::new(&ClientConfig::default())));
        SendPipeline::new(session, Arc::new(backend))
    }

    async fn texts(pipeline: &SendPipeline) -> Vec<(String, bool)> {
        let session = pipeline.session().lock().await;
        session
            .store()
            .active()
            .messages()
            .iter()
            .map(|m| (m.text().to_string(), m.is_user()))
            .collect()
    }

    async fn wait_pending(pipeline: &SendPipeline) {
        while !pipeline.session().lock().await.is_pending() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_hello_hi_scenario() {
        let pipeline = pipeline(FixedBackend(Some("hi")));
        let id = pipeline.session().lock().await.store().active_id();

        let outcome = pipeline.send("hello").await;
        assert_eq!(outcome, SendOutcome::Delivered(id));
        assert_eq!(
            texts(&pipeline).await,
            vec![("hello".to_string(), true), ("hi".to_string(), false)]
        );
        assert!(!pipeline.session().lock().await.is_pending());
    }

    #[tokio::test]
    async fn test_failure_appends_error_bubble() {
        let pipeline = pipeline(FixedBackend(None));

        let outcome = pipeline.send("hello").await;
        assert!(matches!(outcome, SendOutcome::Failed { .. }));

        let session = pipeline.session().lock().await;
        let messages = session.store().active().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].author(), Author::Agent);
        assert!(messages[1].is_error());
        assert_eq!(messages[1].text(), session.strings().delivery_failed);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let pipeline = pipeline(FixedBackend(Some("hi")));
        assert_eq!(
            pipeline.send("  \t ").await,
            SendOutcome::Ignored(IgnoreReason::EmptyInput)
        );
        assert!(texts(&pipeline).await.is_empty());
    }

    #[tokio::test]
    async fn test_user_message_visible_while_pending_and_second_send_ignored() {
        let gate = Arc::new(Notify::new());
        let pipeline = pipeline(GatedBackend {
            gate: Arc::clone(&gate),
        });

        let first = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.send("first").await })
        };
        wait_pending(&pipeline).await;

        assert_eq!(texts(&pipeline).await, vec![("first".to_string(), true)]);
        assert_eq!(
            pipeline.send("second").await,
            SendOutcome::Ignored(IgnoreReason::Pending)
        );
        assert_eq!(texts(&pipeline).await.len(), 1);

        gate.notify_one();
        assert!(matches!(first.await.unwrap(), SendOutcome::Delivered(_)));
        assert_eq!(
            texts(&pipeline).await,
            vec![
                ("first".to_string(), true),
                ("re: first".to_string(), false)
            ]
        );
    }

    #[tokio::test]
    async fn test_reply_goes_to_originating_conversation() {
        let gate = Arc::new(Notify::new());
        let pipeline = pipeline(GatedBackend {
            gate: Arc::clone(&gate),
        });
        let origin = pipeline.session().lock().await.store().active_id();

        let task = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.send("question").await })
        };
        wait_pending(&pipeline).await;

        let other = pipeline
            .session()
            .lock()
            .await
            .store_mut()
            .create_conversation("Other");
        gate.notify_one();
        assert_eq!(task.await.unwrap(), SendOutcome::Delivered(origin));

        let session = pipeline.session().lock().await;
        assert_eq!(session.store().active_id(), other);
        assert!(session.store().active().messages().is_empty());
        assert_eq!(session.store().get(origin).map(|c| c.messages().len()), Some(2));
    }

    #[tokio::test]
    async fn test_reply_for_deleted_conversation_is_discarded() {
        let gate = Arc::new(Notify::new());
        let pipeline = pipeline(GatedBackend {
            gate: Arc::clone(&gate),
        });
        let origin = pipeline.session().lock().await.store().active_id();

        let task = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.send("question").await })
        };
        wait_pending(&pipeline).await;

        {
            let mut session = pipeline.session().lock().await;
            session.store_mut().create_conversation("Other");
            session.store_mut().delete_conversation(origin).unwrap();
        }
        gate.notify_one();
        assert_eq!(task.await.unwrap(), SendOutcome::Discarded(origin));

        let session = pipeline.session().lock().await;
        assert!(!session.is_pending());
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_draft_sends_persona() {
        let pipeline = pipeline(FixedBackend(Some("hello, colleague")));
        {
            let mut session = pipeline.session().lock().await;
            session.set_persona(Some(Persona::Professor));
            session.set_draft("good morning");
        }

        assert!(matches!(pipeline.submit_draft().await, SendOutcome::Delivered(_)));

        let session = pipeline.session().lock().await;
        assert!(session.draft().is_empty());
        let reply = &session.store().active().messages()[1];
        assert_eq!(reply.persona(), Some(Persona::Professor));
    }

    #[tokio::test]
    async fn test_start_claims_pending_before_request_runs() {
        let pipeline = pipeline(FixedBackend(Some("ok")));

        let pending = pipeline.start("first").await.unwrap();
        assert_eq!(
            pipeline.start("second").await.unwrap_err(),
            IgnoreReason::Pending
        );
        assert_eq!(texts(&pipeline).await, vec![("first".to_string(), true)]);

        let conversation = pending.conversation();
        assert_eq!(
            pipeline.finish(pending).await,
            SendOutcome::Delivered(conversation)
        );
        assert_eq!(
            texts(&pipeline).await,
            vec![("first".to_string(), true), ("ok".to_string(), false)]
        );
    }
}
