//! # Common Error Types
//!
//! Consolidated error handling for the desktop client.
//!
//! Collaborator failures rarely reach this type: the core library turns most of them
//! into canned payloads. What remains are the failures a screen has to show the
//! user directly (an unreadable upload, a denied location lookup, a settings write
//! that did not persist).
//!
//! ## Error Categories
//!
//! - **Api**: Collaborator errors that were not absorbed by a fallback
//! - **State**: Application state errors (no session, screen not ready)
//! - **Validation**: Input validation errors (unsupported file, empty field)
//! - **Storage**: Local file and settings store errors
//!
//! ## Usage Pattern
//!
//! ```rust
//! use maatiputra::core::error::AppError;
//!
//! fn validate_district(district: &str) -> Result<&str, AppError> {
//!     if district.trim().is_empty() {
//!         return Err(AppError::Validation("District is required".to_string()));
//!     }
//!     Ok(district.trim())
//! }
//! ```

use lib_core::CoreError;
use thiserror::Error;

/// Application-wide error type for the desktop client.
///
/// # Example
///
/// ```rust
/// use maatiputra::core::error::AppError;
///
/// let err = AppError::Validation("Unsupported file type".to_string());
/// assert_eq!(err.to_string(), "Validation error: Unsupported file type");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Collaborator error surfaced to the user.
    #[error("API error: {0}")]
    Api(String),

    /// Application state error.
    #[error("State error: {0}")]
    State(String),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local storage error (uploads, settings file).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Text for a toast or inline error label.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(msg)
            | AppError::State(msg)
            | AppError::Validation(msg)
            | AppError::Storage(msg) => msg.clone(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Storage(_) => AppError::Storage(err.user_message()),
            CoreError::InvalidInput(_) => AppError::Validation(err.user_message()),
            _ => AppError::Api(err.user_message()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let storage: AppError = CoreError::Storage("disk full".to_string()).into();
        assert!(matches!(storage, AppError::Storage(_)));

        let input: AppError = CoreError::InvalidInput("bad".to_string()).into();
        assert!(matches!(input, AppError::Validation(_)));

        let denied: AppError = CoreError::NotFound("Location access denied.".to_string()).into();
        assert!(matches!(denied, AppError::Api(_)));
    }

    #[test]
    fn test_display_prefix() {
        let err = AppError::State("No active session".to_string());
        assert_eq!(err.to_string(), "State error: No active session");
        assert_eq!(err.user_message(), "No active session");
    }
}
