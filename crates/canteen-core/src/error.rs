//! Unified application error types.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the `?` operator. Callers branch on
//! [`AppError::kind`], never on the message text.

use std::fmt;
use thiserror::Error;

/// Closed set of error categories used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (malformed JSON, empty fields).
    Validation,
    /// The request carries no usable credentials (missing or malformed header).
    Unauthorized,
    /// Username/password pair did not match a stored credential.
    InvalidCredentials,
    /// The referenced account does not exist.
    AccountNotFound,
    /// The account exists but is deactivated.
    AccountDisabled,
    /// The referenced role does not exist.
    RoleNotFound,
    /// No stored refresh token matches the presented value.
    TokenNotFound,
    /// The token (access or refresh) is past its expiry.
    TokenExpired,
    /// The token is malformed, badly signed, or uses an unexpected algorithm.
    TokenInvalid,
    /// The backing store failed (I/O, connection, query).
    Store,
    /// Required configuration is missing or inconsistent.
    Configuration,
    /// Any other unexpected failure.
    Internal,
}

impl ErrorKind {
    /// Returns `true` for kinds that are the server's fault rather than the caller's.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Store | Self::Configuration | Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            Self::AccountDisabled => write!(f, "ACCOUNT_DISABLED"),
            Self::RoleNotFound => write!(f, "ROLE_NOT_FOUND"),
            Self::TokenNotFound => write!(f, "TOKEN_NOT_FOUND"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenInvalid => write!(f, "TOKEN_INVALID"),
            Self::Store => write!(f, "STORE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error.
///
/// Carries a [`ErrorKind`], a human-readable message, and an optional
/// underlying cause kept for logging.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create an account-not-found error.
    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountNotFound, message)
    }

    /// Create an account-disabled error.
    pub fn account_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountDisabled, message)
    }

    /// Create a role-not-found error.
    pub fn role_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoleNotFound, message)
    }

    /// Create a token-not-found error.
    pub fn token_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenNotFound, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a token-invalid error.
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenInvalid, message)
    }

    /// Create a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Store, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Validation, format!("JSON error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::token_not_found("Refresh token not found");
        assert_eq!(err.to_string(), "TOKEN_NOT_FOUND: Refresh token not found");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("connection reset");
        let err = AppError::with_source(ErrorKind::Store, "Failed to delete session", io);
        assert!(std::error::Error::source(&err).is_some());

        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Store);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_server_error_kinds() {
        assert!(ErrorKind::Store.is_server_error());
        assert!(ErrorKind::Configuration.is_server_error());
        assert!(!ErrorKind::TokenExpired.is_server_error());
        assert!(!ErrorKind::InvalidCredentials.is_server_error());
    }
}
