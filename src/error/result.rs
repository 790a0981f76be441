//! Result type alias for GastroLog operations.

use super::context::ErrorContext;
use super::gastro_error::GastroError;

/// Type alias for Results using [`GastroError`].
pub type GastroResult<T> = Result<T, GastroError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> GastroResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> GastroResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<GastroError>,
{
    fn context(self, ctx: ErrorContext) -> GastroResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> GastroResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, ErrorCategory};

    #[test]
    fn test_context_wraps_error() {
        let result: Result<(), AuthError> = Err(AuthError::InvalidCredentials);
        let err = result.context(ErrorContext::new("login")).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Auth);
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("login"));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let result: GastroResult<i32> = Ok(5);
        let value = result
            .with_context(|| panic!("closure must not run on Ok"))
            .unwrap();
        assert_eq!(value, 5);
    }
}
