//! Diff-based profile saving.
//!
//! The edit form starts from the last fetched [`Profile`]. Saving compares
//! each field against that baseline and issues one request per changed
//! field, in a fixed order: photo, username, email, password. The chain is
//! best-effort and not transactional: a failure stops the remaining steps
//! but does not undo the ones already applied.

use std::fmt;

use crate::error::{ErrorContext, GastroError, ResultExt, ValidationError};
use crate::gateway::NetworkGateway;
use crate::models::{PhotoUpload, Profile};

/// Contents of the edit-profile form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEditForm {
    pub username: String,
    pub email: String,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub photo: Option<PhotoUpload>,
}

impl ProfileEditForm {
    /// Form pre-filled from `profile`, password fields blank.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            email: profile.email.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    fn is_blank(&self) -> bool {
        self.username.trim().is_empty()
            && self.email.trim().is_empty()
            && self.new_password.is_empty()
            && self.old_password.is_empty()
            && self.confirm_password.is_empty()
            && self.photo.is_none()
    }
}

/// Which profile field a step touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Photo,
    Username,
    Email,
    Password,
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileField::Photo => "photo",
            ProfileField::Username => "username",
            ProfileField::Email => "email",
            ProfileField::Password => "password",
        };
        write!(f, "{}", name)
    }
}

/// One request of the save chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    Photo(PhotoUpload),
    Username(String),
    Email(String),
    Password { old: String, new: String },
}

impl ProfileUpdate {
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileUpdate::Photo(_) => ProfileField::Photo,
            ProfileUpdate::Username(_) => ProfileField::Username,
            ProfileUpdate::Email(_) => ProfileField::Email,
            ProfileUpdate::Password { .. } => ProfileField::Password,
        }
    }
}

/// What happened when the chain ran.
#[derive(Debug)]
pub struct SaveReport {
    /// Steps the backend accepted, in order.
    pub applied: Vec<ProfileField>,
    /// The step that failed, if any; later steps were not attempted.
    pub failure: Option<(ProfileField, GastroError)>,
}

impl SaveReport {
    /// Whether the profile must be refetched.
    pub fn needs_refresh(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Summary for the user, e.g. "Updated photo, email".
    pub fn summary(&self) -> String {
        let applied: Vec<String> = self.applied.iter().map(|f| f.to_string()).collect();
        match (&self.failure, applied.is_empty()) {
            (None, _) => format!("Updated {}", applied.join(", ")),
            (Some((field, err)), true) => {
                format!("Could not update {}: {}", field, err.user_message())
            }
            (Some((field, err)), false) => format!(
                "Updated {}, but could not update {}: {}",
                applied.join(", "),
                field,
                err.user_message()
            ),
        }
    }
}

pub struct ProfileEditDiffer;

impl ProfileEditDiffer {
    /// Compute the ordered update chain. No I/O.
    ///
    /// Every check runs before the chain is returned, so a rejected form
    /// never reaches the network.
    pub fn diff(form: &ProfileEditForm, baseline: &Profile) -> Result<Vec<ProfileUpdate>, ValidationError> {
        let password_change = if form.new_password.is_empty() {
            None
        } else if form.new_password != form.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        } else if form.old_password.is_empty() {
            return Err(ValidationError::OldPasswordRequired);
        } else {
            Some(ProfileUpdate::Password {
                old: form.old_password.clone(),
                new: form.new_password.clone(),
            })
        };

        let mut updates = Vec::new();
        if let Some(photo) = &form.photo {
            updates.push(ProfileUpdate::Photo(photo.clone()));
        }

        let username = form.username.trim();
        if !username.is_empty() && username != baseline.username.trim() {
            updates.push(ProfileUpdate::Username(username.to_string()));
        }

        let email = form.email.trim();
        let baseline_email = baseline.email.as_deref().unwrap_or_default().trim();
        if !email.is_empty() && email != baseline_email {
            updates.push(ProfileUpdate::Email(email.to_string()));
        }

        updates.extend(password_change);

        if updates.is_empty() {
            return Err(if form.is_blank() {
                ValidationError::EmptyFields
            } else {
                ValidationError::NoChanges
            });
        }
        Ok(updates)
    }

    /// Run the chain strictly in order, stopping at the first failure.
    pub async fn apply(gateway: &NetworkGateway, updates: Vec<ProfileUpdate>) -> SaveReport {
        let mut applied = Vec::with_capacity(updates.len());
        for update in updates {
            let field = update.field();
            let result = match &update {
                ProfileUpdate::Photo(photo) => gateway.update_avatar(photo).await,
                ProfileUpdate::Username(name) => gateway.update_username(name).await,
                ProfileUpdate::Email(email) => gateway.update_email(email).await,
                ProfileUpdate::Password { old, new } => gateway.update_password(old, new).await,
            }
            .with_context(|| ErrorContext::new(format!("update_{}", field)).with_component("profile"));

            match result {
                Ok(()) => {
                    tracing::info!("Profile {} updated", field);
                    applied.push(field);
                }
                Err(err) => {
                    tracing::warn!("Profile {} update failed: {}", field, err);
                    return SaveReport {
                        applied,
                        failure: Some((field, err)),
                    };
                }
            }
        }
        SaveReport {
            applied,
            failure: None,
        }
    }
}
