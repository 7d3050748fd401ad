//! OpenRouter chat-completions client.
//!
//! One blocking POST per call, no retries. Every failure mode (missing
//! credential, transport fault, non-2xx status, unparseable body) collapses
//! into `None`; the distinguishing cause is reported only through `tracing`
//! diagnostics, so callers check for the sentinel rather than catching
//! anything.

use thiserror::Error;
use tracing::{debug, warn};

use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{CompletionRequest, CompletionResponse};

/// Chat-completions endpoint.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable consulted when a request carries no credential
/// override.
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

// Descriptive headers recommended by OpenRouter for request attribution.
// They carry no semantic weight on the remote side.
const DEFAULT_REFERER: &str = "https://github.com/your-username/agents";
const DEFAULT_TITLE: &str = "OpenRouter API Test";

/// Internal failure taxonomy. Absorbed before the public boundary; it exists
/// so the diagnostics can name the cause precisely.
#[derive(Debug, Error)]
enum CallError {
    #[error("no API key: pass an override or set {API_KEY_VAR}")]
    MissingCredential,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("endpoint returned status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("could not parse response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client for the OpenRouter chat-completions endpoint.
///
/// Holds no per-call state; one client can serve any number of sequential
/// calls. The transport is generic so tests can substitute a stub for the
/// network.
pub struct OpenRouterClient<T = HttpTransport> {
    transport: T,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> OpenRouterClient<T> {
    /// Client over a caller-supplied transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Override the descriptive `HTTP-Referer` header.
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Override the descriptive `X-Title` header.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Send one chat-completion request and return the parsed response.
    ///
    /// Returns `None` on every failure mode: a missing credential (detected
    /// before any network traffic), a transport fault, a non-2xx status, or
    /// an unparseable body. A 2xx status with a parseable JSON body is
    /// returned as-is. Exactly one network attempt is made per call.
    pub fn send(&self, request: &CompletionRequest) -> Option<CompletionResponse> {
        match self.call(request) {
            Ok(response) => Some(response),
            Err(err) => {
                warn!(model = %request.model, "chat completion failed: {err}");
                None
            }
        }
    }

    fn call(&self, request: &CompletionRequest) -> Result<CompletionResponse, CallError> {
        let api_key = self.resolve_api_key(request)?;

        let payload = serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        let headers = [
            ("Authorization", format!("Bearer {api_key}")),
            ("Content-Type", "application/json".to_string()),
            ("HTTP-Referer", self.referer.clone()),
            ("X-Title", self.title.clone()),
        ];

        let raw = self
            .transport
            .post_json(OPENROUTER_API_URL, &headers, &payload)?;
        if !raw.is_success() {
            return Err(CallError::Rejected {
                status: raw.status,
                body: raw.body,
            });
        }

        debug!(
            status = raw.status,
            bytes = raw.body.len(),
            "chat completion succeeded"
        );
        Ok(serde_json::from_str(&raw.body)?)
    }

    fn resolve_api_key(&self, request: &CompletionRequest) -> Result<String, CallError> {
        let key = match &request.api_key {
            Some(key) => key.clone(),
            None => std::env::var(API_KEY_VAR).unwrap_or_default(),
        };
        if key.trim().is_empty() {
            return Err(CallError::MissingCredential);
        }
        Ok(key)
    }
}
