//! # Centralized Error Handling
//!
//! This module defines [`CoreError`], the error type returned by every fallible
//! operation in the core library. It follows the `thiserror` pattern.
//!
//! ## Design
//!
//! - **Single Error Type**: All modules return `Result<T>` with `CoreError`
//! - **Never user-facing**: Screens receive canned payloads or apology text instead;
//!   errors surface only in logs and, through [`CoreError::user_message`], in toasts
//!
//! ## Error Categories
//!
//! 1. **Collaborator failures**
//!    - [`Network`](CoreError::Network) - connection refused, DNS, TLS
//!    - [`Http`](CoreError::Http) - non-success status from a collaborator
//!    - [`Timeout`](CoreError::Timeout) - bounded wait expired
//!    - [`Decode`](CoreError::Decode) - malformed JSON or missing fields
//! 2. **Local failures**
//!    - [`Storage`](CoreError::Storage) - settings file unreadable or unwritable
//!    - [`Config`](CoreError::Config) - invalid environment configuration
//! 3. **Lookup results**
//!    - [`NotFound`](CoreError::NotFound) - geocoding found nothing
//!    - [`InvalidInput`](CoreError::InvalidInput) - empty crop, bad coordinates
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{CoreError, Result};
//!
//! fn require_district(district: &str) -> Result<&str> {
//!     if district.trim().is_empty() {
//!         return Err(CoreError::InvalidInput("district is required".to_string()));
//!     }
//!     Ok(district)
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error type covering every failure in the core library.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// Collaborator answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Bounded wait expired.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Response body could not be decoded.
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Durable settings store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Short message suitable for a toast.
    ///
    /// Collaborator details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::InvalidInput(msg) | CoreError::NotFound(msg) => msg.clone(),
            CoreError::Storage(_) => "Could not save settings".to_string(),
            CoreError::Timeout(_) => "The service took too long to respond".to_string(),
            CoreError::Network(_) | CoreError::Http { .. } | CoreError::Decode(_) => {
                "Service temporarily unavailable".to_string()
            }
            CoreError::Config(_) => "Configuration problem".to_string(),
        }
    }

    /// True for failures caused by an unreachable or misbehaving collaborator.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Network(_)
                | CoreError::Http { .. }
                | CoreError::Timeout(_)
                | CoreError::Decode(_)
        )
    }
}

/// Convert `reqwest::Error` to `CoreError`.
impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CoreError::Timeout(err.to_string())
        } else if err.is_decode() {
            CoreError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CoreError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            CoreError::Network(err.to_string())
        }
    }
}

/// Convert `serde_json::Error` to `CoreError`.
impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Decode(format!("JSON error: {}", err))
    }
}

/// Convert `std::io::Error` to `CoreError`.
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for CoreError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        CoreError::Timeout(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_collaborator_details() {
        let err = CoreError::Http {
            status: 503,
            message: "upstream exploded at 10.0.0.7".to_string(),
        };
        assert_eq!(err.user_message(), "Service temporarily unavailable");
        assert!(err.is_collaborator_failure());
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: CoreError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn test_display() {
        let err = CoreError::InvalidInput("crop is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: crop is required");
        assert!(!err.is_collaborator_failure());
    }
}
