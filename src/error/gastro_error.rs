//! Unified error type for the GastroLog client.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::validation::ValidationError;
use crate::traits::TokenStoreError;

/// Unified error type.
///
/// Every operation in the gateway and the state layer returns this, and
/// handlers turn it into an inline message via [`GastroError::user_message`].
#[derive(Debug)]
pub enum GastroError {
    /// Transport and HTTP status errors.
    Network(NetworkError),

    /// Credential and session errors.
    Auth(AuthError),

    /// Input rejected before any request.
    Validation(ValidationError),

    /// The client was asked to do something impossible in its current state.
    Client { message: String },

    /// Token persistence failures.
    Storage(TokenStoreError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<GastroError>,
        context: ErrorContext,
    },
}

impl GastroError {
    /// Shorthand for a [`GastroError::Client`].
    pub fn client(message: impl Into<String>) -> Self {
        GastroError::Client {
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GastroError::Network(err) => match err {
                NetworkError::HttpStatus { .. } | NetworkError::InvalidResponse { .. } => {
                    ErrorCategory::Server
                }
                _ => ErrorCategory::Network,
            },
            GastroError::Auth(_) => ErrorCategory::Auth,
            GastroError::Validation(_) => ErrorCategory::Validation,
            GastroError::Client { .. } => ErrorCategory::Client,
            GastroError::Storage(_) => ErrorCategory::Storage,
            GastroError::WithContext { error, .. } => error.category(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            GastroError::Network(err) => err.user_message(),
            GastroError::Auth(err) => err.user_message(),
            GastroError::Validation(err) => err.user_message(),
            GastroError::Client { message } => message.clone(),
            GastroError::Storage(_) => "Could not access the saved session.".to_string(),
            GastroError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GastroError::Network(err) => err.error_code(),
            GastroError::Auth(err) => err.error_code(),
            GastroError::Validation(err) => err.error_code(),
            GastroError::Client { .. } => "E_CLIENT",
            GastroError::Storage(_) => "E_STORAGE",
            GastroError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        GastroError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            GastroError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &GastroError {
        match self {
            GastroError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self.inner() {
            GastroError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Explanation the server attached to a 4xx rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self.inner() {
            GastroError::Network(NetworkError::HttpStatus { status, message })
                if (400..500).contains(status) && !message.trim().is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// The local validation error, if that is what this is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self.inner() {
            GastroError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the stored token is no longer usable.
    pub fn requires_reauth(&self) -> bool {
        match self.inner() {
            GastroError::Auth(err) => err.invalidates_session(),
            GastroError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            _ => false,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for GastroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GastroError::Network(err) => write!(f, "{}", err),
            GastroError::Auth(err) => write!(f, "{}", err),
            GastroError::Validation(err) => write!(f, "{}", err),
            GastroError::Client { message } => write!(f, "Client error: {}", message),
            GastroError::Storage(err) => write!(f, "{}", err),
            GastroError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for GastroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GastroError::Network(err) => Some(err),
            GastroError::Auth(err) => Some(err),
            GastroError::Validation(err) => Some(err),
            GastroError::Client { .. } => None,
            GastroError::Storage(err) => Some(err),
            GastroError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for GastroError {
    fn from(err: NetworkError) -> Self {
        GastroError::Network(err)
    }
}

impl From<AuthError> for GastroError {
    fn from(err: AuthError) -> Self {
        GastroError::Auth(err)
    }
}

impl From<ValidationError> for GastroError {
    fn from(err: ValidationError) -> Self {
        GastroError::Validation(err)
    }
}

impl From<TokenStoreError> for GastroError {
    fn from(err: TokenStoreError) -> Self {
        GastroError::Storage(err)
    }
}

impl From<serde_json::Error> for GastroError {
    fn from(err: serde_json::Error) -> Self {
        GastroError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
