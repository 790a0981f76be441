//! Network-related error types.
//!
//! Covers transport failures and non-success HTTP statuses. The raw detail
//! is kept for diagnostics; users only ever see [`NetworkError::user_message`].

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The body could not be decoded into the expected payload.
    InvalidResponse { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Build from a transport error raised while requesting `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::Io(message) | HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other { message }
            }
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` for 404 and 403, the "that resource is not for you" family.
    pub fn is_not_found_or_forbidden(&self) -> bool {
        matches!(self.status(), Some(403) | Some(404))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was rejected. Please review the data and try again.".to_string(),
                401 => "Your session is no longer valid. Please sign in again.".to_string(),
                403 => "You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                409 => "That value is already in use.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an unexpected response from the server.".to_string()
            }
            NetworkError::Other { .. } => "A network error occurred. Please try again.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url } => write!(f, "Request to '{}' timed out", url),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_maps_variants() {
        let err = NetworkError::from_http(HttpError::ConnectionFailed("refused".into()), "u");
        assert_eq!(
            err,
            NetworkError::ConnectionFailed {
                url: "u".into(),
                message: "refused".into()
            }
        );

        let err = NetworkError::from_http(HttpError::Timeout("30s".into()), "u");
        assert!(matches!(err, NetworkError::Timeout { .. }));

        let err = NetworkError::from_http(
            HttpError::ServerError {
                status: 502,
                message: "bad gateway".into(),
            },
            "u",
        );
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = NetworkError::HttpStatus {
            status: 500,
            message: "NullPointerException at line 42".to_string(),
        };
        assert!(!err.user_message().contains("NullPointer"));
        assert!(err.to_string().contains("NullPointer"));
    }

    #[test]
    fn test_not_found_or_forbidden() {
        let forbidden = NetworkError::HttpStatus {
            status: 403,
            message: String::new(),
        };
        let missing = NetworkError::HttpStatus {
            status: 404,
            message: String::new(),
        };
        let broken = NetworkError::HttpStatus {
            status: 500,
            message: String::new(),
        };
        assert!(forbidden.is_not_found_or_forbidden());
        assert!(missing.is_not_found_or_forbidden());
        assert!(!broken.is_not_found_or_forbidden());
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let codes = [
            NetworkError::ConnectionFailed {
                url: String::new(),
                message: String::new(),
            }
            .error_code(),
            NetworkError::Timeout { url: String::new() }.error_code(),
            NetworkError::HttpStatus {
                status: 400,
                message: String::new(),
            }
            .error_code(),
            NetworkError::InvalidResponse {
                message: String::new(),
            }
            .error_code(),
            NetworkError::Other {
                message: String::new(),
            }
            .error_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
