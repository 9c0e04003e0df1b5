//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Backend Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Server responded {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Unexpected response from server: {message}")]
    Decode { message: String },

    // ─────────────────────────────────────────────────────────────
    // Form Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Cannot attach {path}: {reason}")]
    Attachment { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn attachment(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Attachment {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn unknown_collection(name: impl Into<String>) -> Self {
        Self::UnknownCollection { name: name.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors are shown on the page that caused them and the
    /// user can simply try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Http { .. }
                | Error::Decode { .. }
                | Error::Validation { .. }
                | Error::Attachment { .. }
        )
    }

    /// Check if this error means the stored credentials are no longer valid
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::NotLoggedIn)
    }

    /// Single line shown near the form or list that triggered the request
    pub fn user_message(&self) -> String {
        match self {
            Error::Http { message, status } if message.trim().is_empty() => {
                format!("Request failed ({status})")
            }
            Error::Http { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::validation("title", "is required");
        assert_eq!(err.to_string(), "title: is required");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::transport("timeout").is_recoverable());
        assert!(Error::http(500, "boom").is_recoverable());
        assert!(Error::validation("title", "is required").is_recoverable());
        assert!(!Error::Unauthorized.is_recoverable());
    }

    #[test]
    fn test_auth_errors() {
        assert!(Error::Unauthorized.is_auth());
        assert!(Error::NotLoggedIn.is_auth());
        assert!(!Error::http(403, "forbidden").is_auth());
    }

    #[test]
    fn test_user_message_prefers_server_body() {
        let err = Error::http(422, "Slug already exists");
        assert_eq!(err.user_message(), "Slug already exists");

        let err = Error::http(502, "  ");
        assert_eq!(err.user_message(), "Request failed (502)");
    }

    #[test]
    fn test_attachment_error_mentions_path() {
        let err = Error::attachment("/tmp/plan.png", "file too large");
        assert!(err.to_string().contains("/tmp/plan.png"));
        assert!(err.to_string().contains("too large"));
    }
}
