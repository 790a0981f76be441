//! The signed-in user's own profile: fetching and editing.

use std::sync::Arc;

use tracing::{info, warn};

use super::{App, AppMessage, View};
use crate::error::{GastroError, GastroResult};
use crate::models::Profile;
use crate::state::{ProfileEditDiffer, ProfileEditForm, RequestScope, SaveReport};

impl App {
    /// Fetch the own profile; it replaces the current one wholesale.
    pub(super) fn refresh_profile(&mut self) {
        let ticket = self.tracker.issue(RequestScope::Profile);
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::ProfileLoaded {
                ticket,
                result: gateway.fetch_profile().await,
            }
        });
    }

    pub(super) fn apply_profile_loaded(&mut self, result: GastroResult<Profile>) {
        match result {
            Ok(profile) => {
                info!(
                    "Profile loaded: {} ({} reviews)",
                    profile.username,
                    profile.reviews.len()
                );
                self.profile = Some(profile);
            }
            Err(err) => self.fail("fetch_profile", &err),
        }
    }

    pub(super) fn show_edit_profile(&mut self) {
        let Some(profile) = &self.profile else {
            self.fail(
                "edit_profile",
                &GastroError::client("Your profile is still loading. Try again in a moment."),
            );
            return;
        };
        self.profile_form = ProfileEditForm::from_profile(profile);
        self.navigate(View::EditProfile);
    }

    /// Diff the form against the last fetched profile and run the update
    /// chain. Rejected forms never reach the network.
    pub(super) fn save_profile(&mut self, form: ProfileEditForm) {
        let Some(baseline) = &self.profile else {
            self.fail(
                "save_profile",
                &GastroError::client("Your profile is still loading. Try again in a moment."),
            );
            return;
        };
        let updates = ProfileEditDiffer::diff(&form, baseline);
        self.profile_form = form;

        let updates = match updates {
            Ok(updates) => updates,
            Err(err) => {
                self.fail("save_profile", &err.into());
                return;
            }
        };

        info!("Saving {} profile change(s)", updates.len());
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::ProfileSaved {
                ticket,
                report: ProfileEditDiffer::apply(&gateway, updates).await,
            }
        });
    }

    pub(super) fn apply_profile_saved(&mut self, report: SaveReport) {
        if report.needs_refresh() {
            self.refresh_profile();
        }
        let summary = report.summary();
        match &report.failure {
            None => {
                self.notice = Some(summary);
                self.profile_form = ProfileEditForm::default();
                self.navigate(View::Home);
            }
            Some((field, err)) => {
                warn!("Profile save stopped at {}: {}", field, err);
                self.error = Some(summary);
                self.profile_form.old_password.clear();
                self.profile_form.new_password.clear();
                self.profile_form.confirm_password.clear();
                if err.requires_reauth() {
                    self.end_session();
                }
            }
        }
    }
}
