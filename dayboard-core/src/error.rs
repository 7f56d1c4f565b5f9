//! Error types for remote store access.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the remote stores.
///
/// The remote layer never recovers from these; they always propagate to the
/// command that initiated the request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: ResponseBody },

    #[error("{0}")]
    Validation(String),

    #[error("could not decode server response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for remote store operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Best-effort capture of an HTTP response body.
///
/// The stores do not commit to a body shape for errors (or even for some
/// successes, e.g. delete), so we try JSON first and keep the raw text when
/// that fails. Callers must tolerate either shape when building messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text.to_string()),
        }
    }

    /// Extract a human-readable message, if the body carries one.
    ///
    /// JSON objects are probed for the conventional `error` / `message` keys
    /// before falling back to the compact JSON itself.
    pub fn message(&self) -> Option<String> {
        match self {
            ResponseBody::Json(value) => {
                for key in ["error", "message"] {
                    if let Some(msg) = value.get(key).and_then(Value::as_str) {
                        return Some(msg.to_string());
                    }
                }
                Some(value.to_string())
            }
            ResponseBody::Text(text) => Some(text.clone()),
            ResponseBody::Empty => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{}", msg),
            None => write!(f, "<empty response>"),
        }
    }
}
