//! Client error taxonomy.
//!
//! DESIGN
//! ======
//! Validation errors are raised before any network call. Transport and
//! status errors are forwarded from the HTTP pipeline unchanged. Missing
//! authorization is never an error here; the router redirects instead.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use crate::session::StorageError;

/// Errors produced by the HTTP pipeline, auth client, and resource clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A client-side precondition failed before anything was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A header value derived from the session could not be encoded.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// The request never produced a response (connect, timeout, DNS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String, body: String },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The session could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Stable machine-readable code for CLI output and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::Storage(_) => "E_STORAGE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a `Status` error from a non-success response, preferring the
    /// server-provided message and falling back to `fallback`.
    #[must_use]
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| fallback.to_owned());
        Self::Status { status, message, body: body.to_owned() }
    }
}

/// Extract a human-readable message from an error payload.
///
/// JSON objects yield `message`, then `error`; a bare JSON string is used
/// as-is; any other non-blank text is returned trimmed.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_owned),
        Ok(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_owned()),
    }
}
