//! Configuration for the chat client and the demo server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::errors::{ChatError, ChatResult};
use crate::domain::message::Persona;

/// Environment variable holding the chat endpoint URL.
pub const ENDPOINT_ENV: &str = "CLONECHAT_ENDPOINT";
/// Environment variable selecting the backend (`http` or `demo`).
pub const MODE_ENV: &str = "CLONECHAT_MODE";
/// Environment variable selecting the persona tag.
pub const PERSONA_ENV: &str = "CLONECHAT_PERSONA";
/// Environment variable overriding the HTTP timeout, in seconds.
pub const TIMEOUT_ENV: &str = "CLONECHAT_TIMEOUT_SECS";
/// Environment variable overriding the demo backend pause, in milliseconds.
pub const DEMO_DELAY_ENV: &str = "CLONECHAT_DEMO_DELAY_MS";
/// Environment variable for the demo server port.
pub const PORT_ENV: &str = "CLONECHAT_PORT";

/// Default chat endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/chat";
/// Default demo server port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default pause of the demo backend before it answers.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(800);

/// Which backend answers messages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// POST to the configured endpoint.
    #[default]
    Http,
    /// Answer locally with canned demo phrases.
    Demo,
}

/// User-facing fixed strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UiStrings {
    /// Text of the bubble appended when delivery fails.
    pub delivery_failed: String,
    /// Typing indicator shown while a request is pending.
    pub typing: String,
    /// Sidebar preview for a conversation without messages.
    pub no_messages: String,
    /// Chat view hint for an empty conversation.
    pub empty_state: String,
    /// Prefix for generated conversation names.
    pub default_name_prefix: String,
    /// Notice shown when deleting the last conversation is refused.
    pub last_conversation: String,
}

impl Default for UiStrings {
    fn default() -> Self {
        Self {
            delivery_failed: "Sorry, could not reach the server".to_string(),
            typing: "AI is typing...".to_string(),
            no_messages: "No messages".to_string(),
            empty_state: "Start the conversation: type a message below".to_string(),
            default_name_prefix: "Chat".to_string(),
            last_conversation: "The last conversation cannot be deleted".to_string(),
        }
    }
}

/// Client-side configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Chat endpoint receiving `POST {message, user_type?}`.
    pub endpoint: String,
    /// Backend selection.
    pub mode: BackendMode,
    /// Persona tag sent with each message, if any.
    pub persona: Option<Persona>,
    /// Request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Pause of the demo backend before each reply.
    pub demo_delay: Duration,
    /// Sidebar preview budget in characters.
    pub preview_chars: usize,
    /// Chat viewport height in lines.
    pub viewport_lines: usize,
    /// Fixed UI strings.
    pub strings: UiStrings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mode: BackendMode::Http,
            persona: None,
            timeout: None,
            demo_delay: DEFAULT_DEMO_DELAY,
            preview_chars: 30,
            viewport_lines: 20,
            strings: UiStrings::default(),
        }
    }
}

impl ClientConfig {
    /// Load from process environment on top of defaults.
    ///
    /// # Errors
    /// Returns an error if a variable holds an unusable value.
    pub fn from_env() -> ChatResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup on top of defaults.
    ///
    /// # Errors
    /// Returns an error if a value cannot be parsed or fails validation.
    pub fn from_lookup<F>(lookup: F) -> ChatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }

        if let Some(mode) = lookup(MODE_ENV) {
            config.mode = match mode.trim().to_ascii_lowercase().as_str() {
                "http" => BackendMode::Http,
                "demo" => BackendMode::Demo,
                other => {
                    return Err(ChatError::InvalidConfig(format!(
                        "{MODE_ENV} must be `http` or `demo`, got `{other}`"
                    )));
                }
            };
        }

        if let Some(persona) = lookup(PERSONA_ENV) {
            let persona = persona
                .parse::<Persona>()
                .map_err(|p| ChatError::InvalidConfig(format!("unknown persona `{p}`")))?;
            config = config.with_persona(Some(persona));
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ChatError::InvalidConfig(format!("{TIMEOUT_ENV} must be a number of seconds"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(millis) = lookup(DEMO_DELAY_ENV) {
            let millis: u64 = millis.trim().parse().map_err(|_| {
                ChatError::InvalidConfig(format!("{DEMO_DELAY_ENV} must be a number of milliseconds"))
            })?;
            config = config.with_demo_delay(Duration::from_millis(millis));
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the backend mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the persona tag.
    #[must_use]
    pub const fn with_persona(mut self, persona: Option<Persona>) -> Self {
        self.persona = persona;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the demo backend pause. Zero answers immediately.
    #[must_use]
    pub const fn with_demo_delay(mut self, delay: Duration) -> Self {
        self.demo_delay = delay;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ChatResult<()> {
        if self.preview_chars == 0 {
            return Err(ChatError::InvalidConfig(
                "preview_chars must be > 0".to_string(),
            ));
        }

        if self.viewport_lines == 0 {
            return Err(ChatError::InvalidConfig(
                "viewport_lines must be > 0".to_string(),
            ));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ChatError::InvalidConfig("timeout must be > 0".to_string()));
        }

        if self.mode == BackendMode::Http {
            let url = Url::parse(&self.endpoint)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ChatError::InvalidConfig(format!(
                    "endpoint scheme must be http or https, got `{}`",
                    url.scheme()
                )));
            }
        }

        Ok(())
    }
}

/// Demo server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Load from process environment on top of defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let port = std::env::var(PORT_ENV)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}
