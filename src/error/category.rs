//! Error category classification for unified error handling.
//!
//! Categories drive how a handler surfaces a failure: inline on the form,
//! as a generic network message, or by redirecting to a fallback view.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connection refused, DNS, timeout).
    Network,

    /// Bad credentials, expired reset token, missing session.
    Auth,

    /// Backend answered with a non-success status.
    Server,

    /// Client-side programming errors (invalid state, impossible request).
    Client,

    /// Input rejected before any network call.
    Validation,

    /// Local token storage failures.
    Storage,
}

impl ErrorCategory {
    /// Whether the user can fix the problem by changing what they typed.
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, ErrorCategory::Auth | ErrorCategory::Validation)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Storage => "storage",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Check your credentials and sign in again",
            ErrorCategory::Server => "The server could not complete the request. Try again later",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::Validation => "Please check your input and try again",
            ErrorCategory::Storage => "Check file permissions and available disk space",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
