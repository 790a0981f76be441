//! Form contents for the authentication and review views.

use crate::error::ValidationError;
use crate::models::{ExternalRestaurant, PhotoUpload, ReviewDraft};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required { field: "email" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required { field: "username" });
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required { field: "email" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.password.is_empty() {
            return Err(ValidationError::Required { field: "password" });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Review being written. Rating 0 means "not chosen yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub rating: u8,
    pub comment: String,
    pub photos: Vec<PhotoUpload>,
}

impl ReviewForm {
    /// Photos accumulate across selections.
    pub fn add_photos(&mut self, photos: impl IntoIterator<Item = PhotoUpload>) {
        self.photos.extend(photos);
    }

    /// Build the `valoracion` payload for `restaurant`.
    ///
    /// `city_fallback` is used when the restaurant has no city tag.
    pub fn draft(
        &self,
        restaurant: &ExternalRestaurant,
        city_fallback: &str,
    ) -> Result<ReviewDraft, ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange {
                rating: self.rating,
            });
        }
        Ok(ReviewDraft {
            restaurant_name: restaurant.display_name().to_string(),
            city: restaurant.city().unwrap_or(city_fallback).to_string(),
            rating: self.rating,
            comment: self.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_RESTAURANT_NAME;

    #[test]
    fn test_register_validation() {
        let mut form = RegisterForm {
            username: "ana".into(),
            email: "a@b.com".into(),
            password: "x".into(),
            confirm_password: "y".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
        form.confirm_password = "x".into();
        assert_eq!(form.validate(), Ok(()));
        form.username = " ".into();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Required { field: "username" })
        );
    }

    #[test]
    fn test_reset_validation() {
        let form = ResetPasswordForm {
            password: "a".into(),
            confirm_password: "b".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "a@b.com".into(),
            password: String::new(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Required { field: "password" })
        );
    }

    #[test]
    fn test_review_rating_bounds() {
        let r = ExternalRestaurant::new(42);
        for rating in [0u8, 6] {
            let form = ReviewForm {
                rating,
                ..Default::default()
            };
            assert_eq!(
                form.draft(&r, "Madrid"),
                Err(ValidationError::RatingOutOfRange { rating })
            );
        }
    }

    #[test]
    fn test_review_draft_fallbacks() {
        let form = ReviewForm {
            rating: 3,
            comment: "ok".into(),
            ..Default::default()
        };
        let draft = form.draft(&ExternalRestaurant::new(1), "Bilbao").unwrap();
        assert_eq!(draft.restaurant_name, DEFAULT_RESTAURANT_NAME);
        assert_eq!(draft.city, "Bilbao");

        let tagged = ExternalRestaurant::new(1)
            .with_tag("name", "Casa Pepe")
            .with_tag("addr:city", "Madrid");
        let draft = form.draft(&tagged, "Bilbao").unwrap();
        assert_eq!(draft.restaurant_name, "Casa Pepe");
        assert_eq!(draft.city, "Madrid");
    }

    #[test]
    fn test_photos_accumulate() {
        let mut form = ReviewForm::default();
        form.add_photos(vec![PhotoUpload::new("a.jpg", vec![1u8])]);
        form.add_photos(vec![PhotoUpload::new("b.jpg", vec![2u8])]);
        assert_eq!(form.photos.len(), 2);
    }
}
