//! Failure surface of the REST client.
//!
//! ERROR HANDLING
//! ==============
//! Only 401 is special: by the time a caller sees [`ApiError::Unauthorized`]
//! the session has already been purged and the navigator sent to `/login`.
//! Every other failure is reported as-is, with no retries.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(reqwest::Error),

    /// Connect, timeout, or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend rejected the credential; the session has been cleared.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidBaseUrl { .. } | Self::HttpClientBuild(_) | Self::Decode(_) => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers `{"error": ...}`; its JWT layer answers `{"msg": ...}`.
/// Anything else falls back to the raw body, then to the status reason.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["error", "msg", "message"] {
            if let Some(text) = map.get(key).and_then(serde_json::Value::as_str) {
                return text.to_owned();
            }
        }
    }
    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_owned()
    } else {
        raw.to_owned()
    }
}
