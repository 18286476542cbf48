//! Error Types
//!
//! One error enum for the API layer, storage and configuration.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// No access token in the session; the page must redirect to login
    #[error("not signed in")]
    MissingCredential,

    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server responded with status {status}")]
    Status { status: u16 },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A newer request superseded this one
    #[error("request cancelled")]
    Cancelled,

    /// Response body was not JSON
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("browser storage unavailable: {0}")]
    Storage(String),
}

impl AppError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether an idempotent request may be sent again after this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Status { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Short text for inline error regions
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => "You must be logged in to view this page.".to_string(),
            Self::Transport(_) | Self::Timeout(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            Self::Status { status } => format!("The server returned an error ({}).", status),
            Self::Cancelled => String::new(),
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
            Self::Config(_) | Self::Storage(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(AppError::Status { status: 503 }.is_retryable());
        assert!(AppError::Status { status: 429 }.is_retryable());
        assert!(!AppError::Status { status: 404 }.is_retryable());
        assert!(!AppError::Status { status: 401 }.is_retryable());
    }

    #[test]
    fn test_cancel_and_credentials_never_retry() {
        assert!(!AppError::Cancelled.is_retryable());
        assert!(!AppError::MissingCredential.is_retryable());
        assert!(AppError::Timeout(Duration::from_secs(1)).is_retryable());
    }

    #[test]
    fn test_cancelled_has_no_user_message() {
        assert!(AppError::Cancelled.is_cancelled());
        assert!(AppError::Cancelled.user_message().is_empty());
        assert_eq!(
            AppError::Status { status: 500 }.user_message(),
            "The server returned an error (500)."
        );
    }
}
