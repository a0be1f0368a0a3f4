use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by [`ApiClient::request`](super::ApiClient::request).
///
/// HTTP-level failures carry the response status plus whatever fields the
/// server put in the body. Transport and decode failures have no status;
/// [`ApiError::status`] is how callers tell "the server said no" apart
/// from "the network ate it".
///
/// `Clone` so a deduplicated request can hand the same outcome to every
/// caller that attached to it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-2xx response; `body` is the parsed JSON error payload.
    #[error("HTTP {status}: {}", summary(.body))]
    Http { status: u16, body: Value },

    /// The request never produced a response (DNS, refused, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request was aborted through a [`CancelHandle`](super::CancelHandle).
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status, when the server actually answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Look up a field of the HTTP error body (e.g. `"message"`).
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ApiError::Http { body, .. } => body.get(name),
            _ => None,
        }
    }

    /// The server's `message` field, if it sent one.
    pub fn message(&self) -> Option<&str> {
        self.field("message")?.as_str()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

fn summary(body: &Value) -> String {
    match body.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => body.to_string(),
    }
}
