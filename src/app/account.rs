//! Sign-in, registration, password recovery and session teardown.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{App, AppMessage, View};
use crate::error::{AuthError, GastroResult, ValidationError};
use crate::gateway::NetworkGateway;
use crate::models::Profile;
use crate::state::{LoginForm, RegisterForm, ResetPasswordForm};

/// Shown after a forgot-password request, whatever the outcome.
pub const RESET_LINK_NOTICE: &str =
    "If an account exists for that address, we have sent a link to reset the password.";

/// Shown after a successful registration.
pub const VERIFY_EMAIL_NOTICE: &str =
    "Account created. Check your e-mail to verify it, then sign in.";

/// Load the saved token and confirm it still works.
async fn resume(gateway: &NetworkGateway) -> GastroResult<Option<Profile>> {
    if !gateway.session().restore().await? {
        return Ok(None);
    }
    gateway.fetch_profile().await.map(Some)
}

/// Exchange credentials for a token and persist it.
async fn sign_in(gateway: &NetworkGateway, form: &LoginForm) -> GastroResult<()> {
    let token = gateway.login(form.email.trim(), &form.password).await?;
    gateway.session().begin(&token).await
}

impl App {
    pub(super) fn login(&mut self, form: LoginForm) {
        if let Err(err) = form.validate() {
            self.fail("login", &err.into());
            return;
        }
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::LoggedIn {
                ticket,
                result: sign_in(&gateway, &form).await,
            }
        });
    }

    pub(super) fn apply_logged_in(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => {
                info!("Signed in");
                self.signed_in = true;
                self.navigate(View::Home);
                self.refresh_profile();
            }
            Err(err) => self.fail("login", &err),
        }
    }

    pub(super) fn resume_session(&mut self) {
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::SessionResumed {
                ticket,
                result: resume(&gateway).await,
            }
        });
    }

    pub(super) fn apply_session_resumed(&mut self, result: GastroResult<Option<Profile>>) {
        match result {
            Ok(Some(profile)) => {
                info!("Resumed session for {}", profile.username);
                self.signed_in = true;
                self.profile = Some(profile);
                self.navigate(View::Home);
            }
            Ok(None) => {
                debug!("No saved session");
                self.notice = Some("No saved session. Please sign in.".to_string());
                self.navigate(View::Login);
            }
            Err(err) => {
                let stale = err.requires_reauth();
                self.fail("resume_session", &err);
                if stale {
                    // The restored token was rejected; forget it.
                    self.end_session();
                }
            }
        }
    }

    pub(super) fn register(&mut self, form: RegisterForm) {
        if let Err(err) = form.validate() {
            self.fail("register", &err.into());
            return;
        }
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            let result = gateway
                .register(form.username.trim(), form.email.trim(), &form.password)
                .await;
            AppMessage::Registered { ticket, result }
        });
    }

    pub(super) fn apply_registered(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => {
                info!("Account registered");
                self.notice = Some(VERIFY_EMAIL_NOTICE.to_string());
                self.navigate(View::Login);
            }
            Err(err) => self.fail("register", &err),
        }
    }

    pub(super) fn forgot_password(&mut self, email: String) {
        let email = email.trim().to_string();
        if email.is_empty() {
            self.fail(
                "forgot_password",
                &ValidationError::Required { field: "email" }.into(),
            );
            return;
        }
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::ResetLinkRequested {
                ticket,
                result: gateway.forgot_password(&email).await,
            }
        });
    }

    /// The outcome is logged but never revealed.
    pub(super) fn apply_reset_link_requested(&mut self, result: GastroResult<()>) {
        if let Err(err) = result {
            warn!("forgot_password failed [{}]: {}", err.error_code(), err);
        }
        self.notice = Some(RESET_LINK_NOTICE.to_string());
        self.navigate(View::Login);
    }

    pub(super) fn reset_password(&mut self, form: ResetPasswordForm) {
        let Some(token) = self.reset_token.clone() else {
            self.fail("reset_password", &AuthError::ResetTokenInvalid.into());
            return;
        };
        if let Err(err) = form.validate() {
            self.fail("reset_password", &err.into());
            return;
        }
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::PasswordReset {
                ticket,
                result: gateway.reset_password(&token, &form.password).await,
            }
        });
    }

    pub(super) fn apply_password_reset(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => {
                info!("Password reset");
                self.reset_token = None;
                self.notice = Some("Password updated. You can now sign in.".to_string());
                self.navigate(View::Login);
            }
            Err(err) => self.fail("reset_password", &err),
        }
    }

    pub(super) fn logout(&mut self) {
        info!("Signing out");
        self.end_session();
    }

    /// Forget the token and every piece of per-session state, then return
    /// to the welcome view. Also used when the server rejects the token.
    ///
    /// Only the persisted copy is removed in the background.
    pub(super) fn end_session(&mut self) {
        self.gateway.session().forget();
        self.reset_session_state();
        self.navigate(View::Welcome);

        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::LoggedOut {
                ticket,
                result: gateway.session().clear_persisted().await,
            }
        });
    }

    pub(super) fn apply_logged_out(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => debug!("Saved token removed"),
            Err(err) => warn!("Could not remove the saved token: {}", err),
        }
    }

    pub(super) fn delete_account(&mut self) {
        let ticket = self.tracker.mutation();
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move {
            AppMessage::AccountDeleted {
                ticket,
                result: gateway.delete_account().await,
            }
        });
    }

    /// On failure the session is kept.
    pub(super) fn apply_account_deleted(&mut self, result: GastroResult<()>) {
        match result {
            Ok(()) => {
                info!("Account deleted");
                self.end_session();
                self.notice = Some("Your account has been deleted.".to_string());
            }
            Err(err) => self.fail("delete_account", &err),
        }
    }
}
