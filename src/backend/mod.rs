//! Chat backends: the remote HTTP endpoint and the local demo responder.
//!
//! Wire contract:
//! - request `POST { "message": string, "user_type"?: string }`
//! - reply `{ "response": string }`

pub mod demo;
pub mod error;
pub mod http;

pub use demo::DemoBackend;
pub use error::DeliveryError;
pub use http::HttpBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::config::{BackendMode, ClientConfig};
use crate::domain::message::Persona;

/// Outbound chat request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Raw message text as typed.
    pub message: String,
    /// Optional persona tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<Persona>,
}

impl ChatRequest {
    /// Build a request.
    #[must_use]
    pub fn new(message: impl Into<String>, user_type: Option<Persona>) -> Self {
        Self {
            message: message.into(),
            user_type,
        }
    }
}

/// Success body of the chat endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text.
    pub response: String,
}

/// Something that turns a chat request into a reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and wait for its reply.
    ///
    /// # Errors
    /// Returns a `DeliveryError` when no usable reply was obtained.
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Build the backend selected by the configuration.
///
/// # Errors
/// Returns an error if the HTTP client cannot be created.
pub fn from_config(config: &ClientConfig) -> Result<Arc<dyn ChatBackend>, DeliveryError> {
    match config.mode {
        BackendMode::Http => {
            let backend = HttpBackend::new(&config.endpoint, config.timeout)?;
            debug!("HTTP backend targets {}", backend.endpoint());
            Ok(Arc::new(backend))
        }
        BackendMode::Demo => Ok(Arc::new(DemoBackend::new().with_delay(config.demo_delay))),
    }
}
