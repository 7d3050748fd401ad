//! Request and response types for the OpenRouter chat-completions API.
//!
//! These mirror the wire format of the remote endpoint. Response fields the
//! endpoint may omit are modeled as `Option` so a shape-deficient body still
//! deserializes; dealing with missing pieces is the extractors' job, not the
//! deserializer's.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire-format name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
/// Sampling temperature used when a request does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Output token cap used when a request does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Parameters for a single chat-completion call.
///
/// Built once per call and discarded afterwards. Message order is forwarded
/// verbatim. `temperature` is passed through as-is; the endpoint's recommended
/// range is 0.0 to 2.0 but nothing here clamps or validates it.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Credential override. When `None` the client falls back to the
    /// [`API_KEY_VAR`](crate::client::API_KEY_VAR) environment variable.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl CompletionRequest {
    /// Request carrying `messages` with the default generation parameters.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Response body of a chat-completion call, deserialized as the endpoint sent
/// it. Nothing is normalized or validated beyond being JSON; use
/// [`CompletionResponse::text`] and [`CompletionResponse::usage`] to pull out
/// the commonly needed pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting as reported by the endpoint, passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    /// The model that actually served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Message inside a response choice. The role is a plain string here: the
/// endpoint owns the vocabulary on the way back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Text content of the first choice's message.
    ///
    /// Returns `None` when the choices list is empty or any expected layer is
    /// missing, with a diagnostic naming what was absent. Never panics.
    pub fn text(&self) -> Option<&str> {
        let Some(choice) = self.choices.first() else {
            debug!("response has no choices");
            return None;
        };
        let Some(message) = choice.message.as_ref() else {
            debug!("first choice has no message");
            return None;
        };
        let Some(content) = message.content.as_deref() else {
            debug!("first choice message has no content");
            return None;
        };
        Some(content)
    }

    /// Token-usage record attached to the response, if any. No shape is
    /// assumed; whatever the endpoint reported is handed back.
    pub fn usage(&self) -> Option<&Value> {
        self.usage.as_ref()
    }
}
