//! Input validation errors.
//!
//! Everything here is raised before a request leaves the client.

use thiserror::Error;

/// Rejections produced by local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("current password is required to set a new one")]
    OldPasswordRequired,

    #[error("no fields were filled in")]
    EmptyFields,

    #[error("nothing changed")]
    NoChanges,

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange { rating: u8 },

    #[error("no {direction} page available")]
    PageUnavailable { direction: &'static str },

    #[error("a restaurant must be selected first")]
    NoRestaurantSelected,
}

impl ValidationError {
    /// Message shown inline next to the form.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::PasswordMismatch => "The passwords do not match.".to_string(),
            ValidationError::OldPasswordRequired => {
                "Enter your current password to change it.".to_string()
            }
            ValidationError::EmptyFields => "Fill in at least one field.".to_string(),
            ValidationError::NoChanges => "There are no changes to save.".to_string(),
            ValidationError::Required { field } => format!("The {} field is required.", field),
            ValidationError::RatingOutOfRange { .. } => {
                "Choose a rating between 1 and 5 stars.".to_string()
            }
            ValidationError::PageUnavailable { .. } => "There are no more pages.".to_string(),
            ValidationError::NoRestaurantSelected => "Select a restaurant first.".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::PasswordMismatch => "E_VAL_PWD_MISMATCH",
            ValidationError::OldPasswordRequired => "E_VAL_OLD_PWD",
            ValidationError::EmptyFields => "E_VAL_EMPTY",
            ValidationError::NoChanges => "E_VAL_NO_CHANGES",
            ValidationError::Required { .. } => "E_VAL_REQUIRED",
            ValidationError::RatingOutOfRange { .. } => "E_VAL_RATING",
            ValidationError::PageUnavailable { .. } => "E_VAL_PAGE",
            ValidationError::NoRestaurantSelected => "E_VAL_NO_RESTAURANT",
        }
    }
}
