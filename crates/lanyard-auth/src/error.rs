//! Authentication and session lifecycle error types.
//!
//! This module defines all error kinds that can surface from the auth
//! orchestrator, the session store, and the token lifecycle manager.
//! Every variant carries a stable string code (see [`AuthError::code`])
//! that boundary layers return to clients instead of free text.

use std::fmt;

/// Errors that can occur during authentication and session operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A sign-up used an email that already belongs to a user.
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// The referenced user does not exist.
    #[error("User not found: {message}")]
    UserNotFound {
        /// Description of the failed lookup.
        message: String,
    },

    /// The presented password does not match the stored credential hash.
    #[error("Password does not match")]
    PasswordMismatch,

    /// Generic sign-in rejection reported to clients.
    ///
    /// Both "no such email" and "wrong password" collapse into this kind at
    /// the HTTP boundary so the response does not leak which check failed.
    #[error("Sign-in rejected")]
    SignInRejected,

    /// The referenced role does not exist.
    #[error("Role not found: {name}")]
    RoleNotFound {
        /// Name of the missing role.
        name: String,
    },

    /// No session matched the given id or token binding.
    #[error("Session not found: {message}")]
    SessionNotFound {
        /// Description of the failed lookup.
        message: String,
    },

    /// A token update was requested for a user with no sessions.
    #[error("No session to update")]
    NoSessionToUpdate,

    /// The store failed to persist a new session.
    #[error("Session not created: {message}")]
    SessionNotCreated {
        /// Description of the failure.
        message: String,
    },

    /// The store failed to delete a session.
    #[error("Session not deleted: {message}")]
    SessionNotDeleted {
        /// Description of the failure.
        message: String,
    },

    /// The request lacks valid authentication credentials
    /// (missing, malformed, badly signed, or expired token).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The credentials are valid but the binding is insufficient.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of why access is forbidden.
        message: String,
    },

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The auth configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `UserNotFound` error.
    #[must_use]
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::UserNotFound {
            message: message.into(),
        }
    }

    /// Creates a new `RoleNotFound` error.
    #[must_use]
    pub fn role_not_found(name: impl Into<String>) -> Self {
        Self::RoleNotFound { name: name.into() }
    }

    /// Creates a new `SessionNotFound` error.
    #[must_use]
    pub fn session_not_found(message: impl Into<String>) -> Self {
        Self::SessionNotFound {
            message: message.into(),
        }
    }

    /// Creates a new `SessionNotCreated` error.
    #[must_use]
    pub fn session_not_created(message: impl Into<String>) -> Self {
        Self::SessionNotCreated {
            message: message.into(),
        }
    }

    /// Creates a new `SessionNotDeleted` error.
    #[must_use]
    pub fn session_not_deleted(message: impl Into<String>) -> Self {
        Self::SessionNotDeleted {
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Forbidden` error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::SessionNotCreated { .. }
                | Self::SessionNotDeleted { .. }
                | Self::Storage { .. }
                | Self::Configuration { .. }
                | Self::Internal { .. }
        )
    }

    /// Returns `true` if this is an authentication error
    /// (identity verification failed).
    #[must_use]
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            Self::PasswordMismatch | Self::SignInRejected | Self::Unauthorized { .. }
        )
    }

    /// Returns `true` if this is a "not found" lookup failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. }
                | Self::RoleNotFound { .. }
                | Self::SessionNotFound { .. }
                | Self::NoSessionToUpdate
        )
    }

    /// Returns the stable error code reported to clients.
    ///
    /// These codes are wire-stable: boundary layers serialize them instead
    /// of the human-readable message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmailAlreadyRegistered => "email_already_registered",
            Self::UserNotFound { .. } => "user_not_found",
            Self::PasswordMismatch => "password_not_match",
            Self::SignInRejected => "user_not_logged",
            Self::RoleNotFound { .. } => "role_not_found",
            Self::SessionNotFound { .. } => "session_not_found",
            Self::NoSessionToUpdate => "no_session_to_update",
            Self::SessionNotCreated { .. } => "session_not_created",
            Self::SessionNotDeleted { .. } => "session_not_deleted",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::Storage { .. } => "storage_error",
            Self::Configuration { .. } => "configuration_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmailAlreadyRegistered => ErrorCategory::Validation,
            Self::UserNotFound { .. } => ErrorCategory::Lookup,
            Self::PasswordMismatch => ErrorCategory::Authentication,
            Self::SignInRejected => ErrorCategory::Authentication,
            Self::RoleNotFound { .. } => ErrorCategory::Lookup,
            Self::SessionNotFound { .. } => ErrorCategory::Session,
            Self::NoSessionToUpdate => ErrorCategory::Session,
            Self::SessionNotCreated { .. } => ErrorCategory::Session,
            Self::SessionNotDeleted { .. } => ErrorCategory::Session,
            Self::Unauthorized { .. } => ErrorCategory::Authentication,
            Self::Forbidden { .. } => ErrorCategory::Authorization,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of auth errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication-related errors (identity verification).
    Authentication,
    /// Authorization-related errors (binding/permission checks).
    Authorization,
    /// Request validation errors.
    Validation,
    /// Entity lookup failures.
    Lookup,
    /// Session store failures.
    Session,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
    /// Internal server errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Validation => write!(f, "validation"),
            Self::Lookup => write!(f, "lookup"),
            Self::Session => write!(f, "session"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
