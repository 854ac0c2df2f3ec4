//! API Error Types
//!
//! Failures surfaced by the API client: the request never completed, the
//! service answered with a non-2xx status, or the body did not have the
//! expected shape.

use thiserror::Error;

/// Message used when the service gives no reason for a failure
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// API error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not complete
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Unexpected JSON shape
    #[error("Unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Build a server error from a status and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Server {
            status,
            message: server_message(body).unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Extract the human-readable reason from an error body.
///
/// Looks at `message`, then `error`, then `detail`; a nested
/// `{"error": {"message": ...}}` is also understood.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| match value.get(*key)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        })
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_keys() {
        assert_eq!(
            server_message(r#"{"message": "User exists"}"#).as_deref(),
            Some("User exists")
        );
        assert_eq!(
            server_message(r#"{"error": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            server_message(r#"{"error": {"code": "X", "message": "nested"}}"#).as_deref(),
            Some("nested")
        );
        assert_eq!(server_message(r#"{"message": ""}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }

    #[test]
    fn test_from_response_generic_fallback() {
        let err = ApiError::from_response(500, "");
        assert_eq!(err.to_string(), GENERIC_FAILURE);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_helpers() {
        assert!(ApiError::from_response(404, "{}").is_not_found());
        assert!(ApiError::from_response(401, "{}").is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }
}
