//! Error types used throughout the SERPRO client

use thiserror::Error;

/// Main error type for SERPRO gateway operations
///
/// The first six variants are the outcomes a caller can observe from
/// `authenticate` and the query operations. `InvalidRequest` and `Config`
/// cover failures that happen before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerproError {
    /// The Basic authorization value could not be built.
    #[error("Invalid credentials: client id/secret could not be encoded")]
    InvalidCredentials,

    /// No usable HTTP response: connect failure, timeout, or unreadable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body is not a JSON object, or lacks `access_token`.
    #[error("Invalid response: body is not the expected JSON document")]
    InvalidResponse,

    /// A query ran before a successful `authenticate`.
    #[error("No access token: authenticate() must succeed before querying")]
    NoAccessToken,

    /// The gateway accepted the request but the result is not ready yet.
    /// Re-issue the query with this key to collect it.
    #[error("Request is still processing (key {0})")]
    ProcessingKey(String),

    /// The body reported a non-success status.
    #[error("Server error {code}: {message}")]
    ServerError {
        /// Status from the body
        code: i64,
        /// Message from the body, or a placeholder
        message: String,
    },

    /// Caller input that cannot form a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bad base URL, unreadable config, or missing credentials.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SerproError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::Transport(_) => "transport",
            Self::InvalidResponse => "invalid_response",
            Self::NoAccessToken => "no_access_token",
            Self::ProcessingKey(_) => "processing",
            Self::ServerError { .. } => "server_error",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Config(_) => "config",
        }
    }

    /// Key to re-request a pending certificate with, if this is one.
    pub fn processing_key(&self) -> Option<&str> {
        match self {
            Self::ProcessingKey(key) => Some(key),
            _ => None,
        }
    }

    /// True when the caller has to call `authenticate()` first.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::NoAccessToken)
    }
}

/// Result type alias for SERPRO operations
pub type Result<T> = std::result::Result<T, SerproError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_display_carries_code_and_message() {
        let err = SerproError::ServerError { code: 404, message: "not found".into() };
        assert_eq!(err.to_string(), "Server error 404: not found");
        assert_eq!(err.label(), "server_error");
    }

    #[test]
    fn processing_key_is_only_exposed_for_pending_results() {
        assert_eq!(SerproError::ProcessingKey("K1".into()).processing_key(), Some("K1"));
        assert_eq!(SerproError::InvalidResponse.processing_key(), None);
    }

    #[test]
    fn only_missing_token_requires_authentication() {
        assert!(SerproError::NoAccessToken.is_auth_required());
        assert!(!SerproError::Transport("reset".into()).is_auth_required());
    }
}
