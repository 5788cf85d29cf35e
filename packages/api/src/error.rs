//! Error classification for every call made through [`crate::ApiClient`].

use serde::Deserialize;

/// Message shown when a failure carries no server-provided text and the call
/// site gives no more specific fallback.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401. The session has already been cleared; the top-level
    /// coordinator handles the redirect. `message` is the server's detail,
    /// e.g. why a login attempt was refused.
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Rejected on the client before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Non-success response, with the server's structured message if any.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user, or `None` when nothing should be shown at the
    /// call site (authentication failures are reported by the redirect).
    pub fn user_message(&self, fallback: &str) -> Option<String> {
        match self {
            ApiError::Unauthenticated { .. } => None,
            ApiError::Validation(message) => Some(message.clone()),
            ApiError::Server {
                message: Some(message),
                ..
            } => Some(message.clone()),
            ApiError::Server { message: None, .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_) => Some(fallback.to_string()),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated { .. })
    }

    /// The server's own message for a 401, if it sent one.
    pub fn unauthenticated_detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthenticated { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Classify a 401 response body.
    pub(crate) fn unauthenticated(body: &[u8]) -> Self {
        ApiError::Unauthenticated {
            message: error_message(body),
        }
    }

    /// Classify a non-success response body.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        ApiError::Server {
            status,
            message: error_message(body),
        }
    }
}

/// Error bodies seen from the service: FastAPI's `{"detail": "..."}` plus the
/// common `message` / `error` spellings. FastAPI validation errors carry a list
/// under `detail`; the first entry's `msg` is used.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
    error: Option<String>,
}

fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let detail = parsed.detail.and_then(|detail| match detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    });
    detail
        .or(parsed.message)
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_extracted() {
        let err = ApiError::from_response(400, br#"{"detail": "Failed to create note: boom"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: Some("Failed to create note: boom".into())
            }
        );
        assert_eq!(
            err.user_message("fallback").as_deref(),
            Some("Failed to create note: boom")
        );
    }

    #[test]
    fn test_validation_detail_list() {
        let body = br#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err.user_message("fallback").as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_alternate_spellings() {
        let err = ApiError::from_response(500, br#"{"error": "Initialization failed"}"#);
        assert_eq!(err.user_message("x").as_deref(), Some("Initialization failed"));

        let err = ApiError::from_response(500, br#"{"message": "down"}"#);
        assert_eq!(err.user_message("x").as_deref(), Some("down"));
    }

    #[test]
    fn test_unstructured_body_uses_fallback() {
        let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                message: None
            }
        );
        assert_eq!(
            err.user_message("Failed to delete note").as_deref(),
            Some("Failed to delete note")
        );
        assert_eq!(
            ApiError::Transport("dns".into()).user_message(GENERIC_ERROR).as_deref(),
            Some(GENERIC_ERROR)
        );
    }

    #[test]
    fn test_unauthenticated_is_never_shown() {
        let err = ApiError::unauthenticated(br#"{"detail": "Login failed: Email not confirmed"}"#);
        assert!(err.user_message("anything").is_none());
        assert!(err.is_unauthenticated());
        assert_eq!(
            err.unauthenticated_detail(),
            Some("Login failed: Email not confirmed")
        );

        let bare = ApiError::unauthenticated(b"");
        assert_eq!(bare, ApiError::Unauthenticated { message: None });
        assert!(bare.unauthenticated_detail().is_none());
    }
}
