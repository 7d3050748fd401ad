//! Utilities for the OpenRouter chat-completions API.
//!
//! A small, synchronous toolkit:
//! - [`OpenRouterClient`] sends one blocking chat-completion request per call
//! - [`CompletionResponse::text`] and [`CompletionResponse::usage`] pull the
//!   interesting pieces back out of the reply
//! - [`helpers`] covers the surrounding chores: `.env` loading, JSON
//!   persistence, directory creation, conversation display
//!
//! Failures never escape as panics or errors. Every public function returns
//! an `Option` or a `bool`, and the cause is reported through `tracing`
//! events, which are silent unless the caller installs a subscriber.
//!
//! ```no_run
//! use openrouter_utils::{CompletionRequest, Message, OpenRouterClient};
//!
//! let client = OpenRouterClient::new();
//! let request = CompletionRequest::new(vec![
//!     Message::user("What is the capital of France?"),
//! ])
//! .model("openai/gpt-4o-mini")
//! .temperature(0.2);
//!
//! if let Some(response) = client.send(&request) {
//!     println!("{}", response.text().unwrap_or("<no content>"));
//! }
//! ```

pub mod client;
pub mod helpers;
pub mod transport;
pub mod types;

pub use client::{OpenRouterClient, API_KEY_VAR, OPENROUTER_API_URL};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use types::{
    Choice, ChoiceMessage, CompletionRequest, CompletionResponse, Message, Role,
};
