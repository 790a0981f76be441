//! Authentication error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Login rejected (wrong email or password).
    InvalidCredentials,

    /// Password reset token was rejected by the server.
    ResetTokenInvalid,

    /// No token is stored; the request needs a session.
    NotAuthenticated,

    /// The server rejected the stored token.
    SessionExpired,

    /// Registration refused (duplicate user, bad data).
    RegistrationRejected { message: String },

    /// Password change refused because the current password did not match.
    /// The session stays valid.
    WrongOldPassword { message: String },
}

impl AuthError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Incorrect email or password.".to_string(),
            AuthError::ResetTokenInvalid => {
                "The reset link is invalid or has expired. Request a new one.".to_string()
            }
            AuthError::NotAuthenticated => "You need to sign in first.".to_string(),
            AuthError::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            AuthError::RegistrationRejected { message } if !message.trim().is_empty() => {
                format!("Registration failed: {}", message.trim())
            }
            AuthError::RegistrationRejected { .. } => {
                "Registration failed. The username or email may already be in use.".to_string()
            }
            AuthError::WrongOldPassword { message } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            AuthError::WrongOldPassword { .. } => "The current password is incorrect.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "E_AUTH_INVALID",
            AuthError::ResetTokenInvalid => "E_AUTH_RESET",
            AuthError::NotAuthenticated => "E_AUTH_NONE",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
            AuthError::RegistrationRejected { .. } => "E_AUTH_REGISTER",
            AuthError::WrongOldPassword { .. } => "E_AUTH_OLD_PASSWORD",
        }
    }

    /// Whether the stored token should be discarded.
    pub fn invalidates_session(&self) -> bool {
        matches!(self, AuthError::SessionExpired)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::ResetTokenInvalid => write!(f, "Reset token rejected"),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::RegistrationRejected { message } => {
                write!(f, "Registration rejected: {}", message)
            }
            AuthError::WrongOldPassword { message } => {
                write!(f, "Old password rejected: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
