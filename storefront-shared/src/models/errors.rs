use serde::{Deserialize, Serialize};

/// Represents an error response from the hosted backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message
    pub message: String,
    /// Optional additional details about the error
    pub details: Option<String>,
}

/// The auth endpoints and the REST endpoints disagree on field names.
#[derive(Deserialize)]
struct RawErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new error response with message and details.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Parse a backend error body, falling back to the raw text when it is
    /// not JSON.
    pub fn from_body(body: &str) -> Self {
        let Ok(raw) = serde_json::from_str::<RawErrorBody>(body) else {
            return Self::new(body.trim());
        };
        let message = raw
            .message
            .or(raw.msg)
            .or(raw.error_description)
            .or(raw.error)
            .unwrap_or_else(|| body.trim().to_string());
        Self {
            message,
            details: raw.details.or(raw.hint),
        }
    }

    /// Checks if this error response has details.
    pub const fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}
