//! Local demo responder: answers with canned phrases, no network involved.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{ChatBackend, ChatReply, ChatRequest, DeliveryError};

/// Canned replies.
pub const DEMO_RESPONSES: [&str; 10] = [
    "Hi! How are you doing?",
    "Interesting, tell me more!",
    "I see what you mean...",
    "Shall we go into this in more detail?",
    "Hm, I never thought about it that way!",
    "That really matters!",
    "Go on, I'm listening!",
    "How interesting! What happened next?",
    "I would have done exactly the same!",
    "Great thought, I agree!",
];

/// Pick one demo reply at random.
#[must_use]
pub fn random_reply() -> String {
    DEMO_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEMO_RESPONSES[0])
        .to_string()
}

/// Backend that never fails and never leaves the process.
#[derive(Debug, Default)]
pub struct DemoBackend {
    delay: Duration,
}

impl DemoBackend {
    /// Reply immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Simulate a thinking pause before each reply.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ChatBackend for DemoBackend {
    async fn send(&self, _request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
        let response = random_reply();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(ChatReply { response })
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
