//! Error types for the library API client.
//!
//! # Design
//! `NotFound` and `Validation` get dedicated variants because views react to
//! them differently from an unexpected status: a validation failure carries a
//! message meant for the user. All other non-2xx responses land in
//! `HttpError` with the raw status and body for diagnostics.

use thiserror::Error;

/// Errors returned by `LibraryClient` parse methods and `Transport`s.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the payload (400, 409 or 422). `message` is the
    /// JSON `message` field when present; `body` is kept as received.
    #[error("validation failed: {body}")]
    Validation {
        message: Option<String>,
        body: String,
    },

    /// The server returned any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// User-facing message supplied by the server, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::HttpError { body, .. } => message_field(body),
            _ => None,
        }
    }
}

/// Extract `message` from a JSON error body such as `{"message":"..."}`.
pub(crate) fn message_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
