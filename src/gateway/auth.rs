//! Public authentication endpoints.

use serde_json::json;

use super::{query, NetworkGateway};
use crate::error::{AuthError, GastroError, GastroResult};

impl NetworkGateway {
    /// `POST /auth/login`. Returns the bearer token sent back as plain text.
    ///
    /// Does not start the session; the caller decides when to persist it.
    pub async fn login(&self, email: &str, pwd: &str) -> GastroResult<String> {
        let response = self
            .post_public("/auth/login", &json!({ "email": email, "pwd": pwd }))
            .await
            .map_err(|e| match e.status() {
                Some(400) | Some(401) | Some(403) | Some(404) => {
                    GastroError::from(AuthError::InvalidCredentials)
                }
                _ => e,
            })?;

        let token = response
            .text()
            .map_err(|e| GastroError::client(format!("login token is not UTF-8: {}", e)))?;
        let token = token.trim().trim_matches('"').to_string();
        if token.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }
        Ok(token)
    }

    /// `POST /auth/register`.
    pub async fn register(&self, username: &str, email: &str, pwd: &str) -> GastroResult<()> {
        self.post_public(
            "/auth/register",
            &json!({ "nombreUsuario": username, "email": email, "pwd": pwd }),
        )
        .await
        .map_err(|e| match e.status() {
            Some(status) if (400..500).contains(&status) => {
                GastroError::from(AuthError::RegistrationRejected {
                    message: server_detail(&e),
                })
            }
            _ => e,
        })?;
        Ok(())
    }

    /// `POST /auth/forgot-password`.
    ///
    /// Callers report the same generic notice whatever this returns.
    pub async fn forgot_password(&self, email: &str) -> GastroResult<()> {
        self.post_public("/auth/forgot-password", &json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// `POST /auth/reset-password?token=...`.
    pub async fn reset_password(&self, reset_token: &str, pwd: &str) -> GastroResult<()> {
        let path = format!(
            "/auth/reset-password?{}",
            query(&[("token", reset_token.to_string())])
        );
        self.post_public(&path, &json!({ "pwd": pwd }))
            .await
            .map_err(|e| match e.status() {
                Some(status) if (400..500).contains(&status) => {
                    GastroError::from(AuthError::ResetTokenInvalid)
                }
                _ => e,
            })?;
        Ok(())
    }
}

fn server_detail(err: &GastroError) -> String {
    match err.inner() {
        GastroError::Network(crate::error::NetworkError::HttpStatus { message, .. }) => {
            message.clone()
        }
        _ => String::new(),
    }
}
