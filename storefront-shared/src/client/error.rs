//! # Backend Error Types
//!
//! Errors raised at the boundary with the hosted backend.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::ErrorResponse;

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Every way a call to the hosted backend can fail.
#[derive(Error, Debug)]
pub enum BackendError {
    /// URL or API key missing or malformed
    #[error("Backend is not configured: {0}")]
    NotConfigured(#[from] ConfigError),

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status with the backend's error body
    #[error("Backend returned {status}: {body}")]
    Http { status: u16, body: ErrorResponse },

    /// The call needs a signed-in user
    #[error("Not signed in")]
    NotAuthenticated,

    /// The response parsed but did not contain what was expected
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

impl BackendError {
    /// Create a new HTTP error from a status and raw body
    pub fn http(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            body: ErrorResponse::from_body(body),
        }
    }

    /// Create a new unexpected response error
    pub fn unexpected<T: Into<String>>(message: T) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// HTTP status, when the backend answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for an inline form error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured(_) => "The store is not configured yet.".to_string(),
            Self::Transport(_) => "Unable to reach the store. Check your connection.".to_string(),
            Self::Http { body, .. } => body.message.clone(),
            Self::NotAuthenticated => "Please sign in first.".to_string(),
            Self::UnexpectedResponse { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BACKEND_URL_VAR;

    #[test]
    fn test_http_error_parses_body() {
        let error = BackendError::http(400, r#"{"error_description":"Invalid login credentials"}"#);
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.user_message(), "Invalid login credentials");
        assert_eq!(
            error.to_string(),
            "Backend returned 400: Invalid login credentials"
        );
    }

    #[test]
    fn test_not_configured_message() {
        let error = BackendError::from(ConfigError::Missing(BACKEND_URL_VAR));
        assert_eq!(error.status(), None);
        assert!(error.to_string().contains(BACKEND_URL_VAR));
        assert_eq!(error.user_message(), "The store is not configured yet.");
    }
}
