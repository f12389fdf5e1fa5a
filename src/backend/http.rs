//! HTTP chat backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{ChatBackend, ChatReply, ChatRequest, DeliveryError};

/// Posts each message to a remote chat endpoint.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    /// Create a backend for `endpoint`. With `timeout = None` the transport
    /// default applies.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DeliveryError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Target URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
        debug!("POST {} ({} chars)", self.endpoint, request.message.chars().count());

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Chat endpoint answered {}", status);
            return Err(DeliveryError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<ChatReply>(&body).map_err(|e| DeliveryError::Decode(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
