//! Unified error system for Streamr
//!
//! One error type crosses every backend boundary (session provider, document
//! store, blob store). Page controllers turn it into a display string with
//! [`StreamrError::user_message`]; nothing in the navigation layer can fail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons a session provider can reject a sign-in, sign-up or sign-out.
///
/// Serialised as the provider error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum AuthFailure {
    /// Malformed email address
    InvalidEmail,
    /// Account exists but has been disabled
    UserDisabled,
    /// No account for this email
    UserNotFound,
    /// Password does not match
    WrongPassword,
    /// Sign-up with an email that already has an account
    EmailAlreadyInUse,
    /// Password shorter than the provider minimum
    WeakPassword,
    /// Sensitive action needs a fresh sign-in
    RequiresRecentLogin,
    /// Generic credential rejection
    InvalidCredential,
    /// Federated sign-in window could not be opened
    PopupBlocked,
    /// Federated sign-in window closed by the user
    PopupClosedByUser,
    /// A newer federated sign-in request superseded this one
    CancelledPopupRequest,
    /// Anything the provider did not classify
    Unknown,
}

impl AuthFailure {
    /// Provider error code, e.g. `auth/wrong-password`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::UserDisabled => "auth/user-disabled",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::RequiresRecentLogin => "auth/requires-recent-login",
            Self::InvalidCredential => "auth/invalid-credential",
            Self::PopupBlocked => "auth/popup-blocked",
            Self::PopupClosedByUser => "auth/popup-closed-by-user",
            Self::CancelledPopupRequest => "auth/cancelled-popup-request",
            Self::Unknown => "auth/unknown",
        }
    }

    /// Parse a provider error code. Unrecognised codes map to `Unknown`.
    ///
    /// The raw `INVALID_LOGIN_CREDENTIALS` payload some providers emit is
    /// treated as [`AuthFailure::InvalidCredential`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/user-disabled" => Self::UserDisabled,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/requires-recent-login" => Self::RequiresRecentLogin,
            "auth/invalid-credential" | "INVALID_LOGIN_CREDENTIALS" => Self::InvalidCredential,
            "auth/popup-blocked" => Self::PopupBlocked,
            "auth/popup-closed-by-user" => Self::PopupClosedByUser,
            "auth/cancelled-popup-request" => Self::CancelledPopupRequest,
            _ => Self::Unknown,
        }
    }

    /// Message shown on the auth screen, or `None` when the provider's own
    /// message should be shown instead.
    pub fn friendly_message(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::UserDisabled => "This account has been disabled.",
            Self::UserNotFound => {
                "No account found with this email. Please sign up or check your email."
            }
            Self::WrongPassword => "Incorrect password. Please try again.",
            Self::EmailAlreadyInUse => "An account already exists with this email address.",
            Self::WeakPassword => "Password is too weak. It should be at least 6 characters.",
            Self::RequiresRecentLogin => {
                "This action requires a recent login. Please sign out and sign in again."
            }
            Self::InvalidCredential => {
                "Invalid login credentials. Please check your email and password, or sign up if you don't have an account."
            }
            Self::PopupBlocked => {
                "Popup was blocked by your browser. Please allow popups for this site and try again."
            }
            Self::PopupClosedByUser | Self::CancelledPopupRequest => {
                "Sign-in was cancelled. Please try again."
            }
            Self::Unknown => return None,
        })
    }
}

impl From<String> for AuthFailure {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<AuthFailure> for &'static str {
    fn from(failure: AuthFailure) -> Self {
        failure.code()
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Unified error type for all Streamr operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum StreamrError {
    /// Invalid input or request
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Record or blob not found
    #[error("Not found: {message}")]
    NotFound {
        /// What was not found
        message: String,
    },

    /// Backend refused the operation
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the permission issue
        message: String,
    },

    /// Session provider rejected a sign-in/out request
    #[error("Authentication failed ({reason}): {message}")]
    Auth {
        /// Classified failure reason
        reason: AuthFailure,
        /// Provider message
        message: String,
    },

    /// Transport failure talking to the backend
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Document or blob storage failure
    #[error("Storage error: {message}")]
    Storage {
        /// Error message describing the storage failure
        message: String,
    },

    /// Record could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message describing the serialization failure
        message: String,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl StreamrError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(reason: AuthFailure, message: impl Into<String>) -> Self {
        Self::Auth {
            reason,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Text suitable for an inline error banner.
    ///
    /// Auth failures use the provider-specific friendly wording; everything
    /// else falls back to the carried message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { reason, message } => reason
                .friendly_message()
                .map(str::to_string)
                .unwrap_or_else(|| {
                    if message.is_empty() {
                        "An unexpected error occurred. Please try again.".to_string()
                    } else {
                        message.clone()
                    }
                }),
            Self::Invalid { message }
            | Self::NotFound { message }
            | Self::PermissionDenied { message }
            | Self::Network { message }
            | Self::Storage { message }
            | Self::Serialization { message }
            | Self::Config { message }
            | Self::Internal { message } => message.clone(),
        }
    }
}

/// Standard Result type for Streamr operations
pub type Result<T> = std::result::Result<T, StreamrError>;

impl From<serde_json::Error> for StreamrError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for StreamrError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for StreamrError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
