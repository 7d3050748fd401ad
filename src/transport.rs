//! Transport seam for the chat-completions call.
//!
//! [`Transport`] isolates the client from the HTTP library so tests can swap
//! in a stub. [`HttpTransport`] is the production implementation over
//! reqwest's blocking client with a fixed timeout.

use std::time::Duration;

use thiserror::Error;

/// Seconds before an in-flight request is abandoned.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport-level failure: connection refused, DNS, timeout, or an
/// unreadable body.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A single POST of a JSON payload. Implementations make exactly one attempt;
/// retry policy is out of scope at this layer.
pub trait Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError>;
}

/// Blocking reqwest transport with a [`REQUEST_TIMEOUT_SECS`] timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        // Building the configured client only fails on a broken TLS backend;
        // the library default (no timeout) is the fallback.
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = RawResponse {
            status: 200,
            body: String::new(),
        };
        let created = RawResponse {
            status: 201,
            body: String::new(),
        };
        let redirect = RawResponse {
            status: 301,
            body: String::new(),
        };
        let client_error = RawResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(created.is_success());
        assert!(!redirect.is_success());
        assert!(!client_error.is_success());
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::new("connection refused");
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
