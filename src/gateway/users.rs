//! Own profile, account settings and user lookup.

use serde_json::json;

use super::{query, segment, NetworkGateway};
use crate::error::{AuthError, GastroError, GastroResult};
use crate::models::{PhotoUpload, Profile, PublicProfile, UserSummary};
use crate::traits::{Method, MultipartForm};

impl NetworkGateway {
    /// `GET /perfil/me`.
    pub async fn fetch_profile(&self) -> GastroResult<Profile> {
        self.get_json("/perfil/me").await
    }

    /// `PUT /usuarios/nombre-usuario`.
    pub async fn update_username(&self, username: &str) -> GastroResult<()> {
        self.put_json(
            "/usuarios/nombre-usuario",
            &json!({ "nombreUsuario": username }),
        )
        .await?;
        Ok(())
    }

    /// `PUT /usuarios/email`.
    pub async fn update_email(&self, email: &str) -> GastroResult<()> {
        self.put_json("/usuarios/email", &json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// `PUT /usuarios/password`.
    ///
    /// The backend answers a wrong old password with 401, which here is a
    /// form error rather than a rejected session.
    pub async fn update_password(&self, old_password: &str, new_password: &str) -> GastroResult<()> {
        self.put_json(
            "/usuarios/password",
            &json!({ "oldPassword": old_password, "newPassword": new_password }),
        )
        .await
        .map_err(|e| match e.status() {
            Some(401) => GastroError::from(AuthError::WrongOldPassword {
                message: e.server_message().unwrap_or_default().to_string(),
            }),
            _ => e,
        })?;
        Ok(())
    }

    /// `PUT /usuarios/perfil/foto` with the image in the `file` part.
    pub async fn update_avatar(&self, photo: &PhotoUpload) -> GastroResult<()> {
        let url = self.url("/usuarios/perfil/foto");
        let headers = self.auth_headers().await?;
        let form = MultipartForm::new().file(
            "file",
            photo.file_name.clone(),
            photo.content_type.clone(),
            photo.bytes.clone(),
        );
        Self::check(
            self.http
                .send_multipart(Method::Put, &url, form, &headers)
                .await,
            &url,
        )?;
        Ok(())
    }

    /// `DELETE /usuarios/me`.
    pub async fn delete_account(&self) -> GastroResult<()> {
        self.delete("/usuarios/me").await?;
        Ok(())
    }

    /// `GET /usuarios/buscar?q=`.
    pub async fn search_users(&self, q: &str) -> GastroResult<Vec<UserSummary>> {
        let path = format!("/usuarios/buscar?{}", query(&[("q", q.to_string())]));
        self.get_json(&path).await
    }

    /// `GET /usuarios/{username}/perfil`.
    pub async fn public_profile(&self, username: &str) -> GastroResult<PublicProfile> {
        self.get_json(&format!("/usuarios/{}/perfil", segment(username)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::adapters::MockResponse;
    use crate::models::PhotoUpload;
    use crate::traits::FormPart;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_profile_sends_bearer() {
        let (gw, http) = signed_in().await;
        http.set_response(
            "GET",
            &url("/perfil/me"),
            MockResponse::json(json!({"nombreUsuario": "ana", "valoraciones": []})),
        );

        let profile = gw.fetch_profile().await.unwrap();
        assert_eq!(profile.username, "ana");

        let req = &http.get_requests()[0];
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer jwt-1")
        );
    }

    #[tokio::test]
    async fn test_account_updates_use_wire_field_names() {
        let (gw, http) = signed_in().await;
        http.set_default_response(MockResponse::json(json!({})));

        gw.update_username("bea").await.unwrap();
        gw.update_email("bea@b.com").await.unwrap();
        gw.update_password("old", "new").await.unwrap();

        let put = |path: &str| http.requests_to("PUT", path)[0].json_body().unwrap();
        assert_eq!(put("/usuarios/nombre-usuario"), json!({"nombreUsuario": "bea"}));
        assert_eq!(put("/usuarios/email"), json!({"email": "bea@b.com"}));
        assert_eq!(
            put("/usuarios/password"),
            json!({"oldPassword": "old", "newPassword": "new"})
        );
    }

    #[tokio::test]
    async fn test_avatar_goes_in_file_part() {
        let (gw, http) = signed_in().await;
        http.set_default_response(MockResponse::json(json!({})));

        gw.update_avatar(&PhotoUpload::new("yo.png", vec![1u8, 2, 3]))
            .await
            .unwrap();

        let req = &http.requests_to("PUT", "/usuarios/perfil/foto")[0];
        let form = req.form.as_ref().unwrap();
        assert_eq!(form.parts.len(), 1);
        match &form.parts[0] {
            FormPart::File {
                name,
                file_name,
                content_type,
                ..
            } => {
                assert_eq!(name, "file");
                assert_eq!(file_name, "yo.png");
                assert_eq!(content_type, "image/png");
            }
            other => panic!("unexpected part {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_user_search_and_public_profile_encode() {
        let (gw, http) = signed_in().await;
        http.set_response(
            "GET",
            &url("/usuarios/buscar"),
            MockResponse::json(json!([{"nombreUsuario": "ana maría", "fotoPerfilUrl": null}])),
        );
        http.set_response(
            "GET",
            &url("/usuarios/ana%20mar%C3%ADa/perfil"),
            MockResponse::json(json!({"nombreUsuario": "ana maría", "isPrivate": false})),
        );

        let users = gw.search_users("ana m").await.unwrap();
        assert_eq!(users[0].username, "ana maría");
        assert!(http.get_requests()[0].url.ends_with("/usuarios/buscar?q=ana%20m"));

        let profile = gw.public_profile("ana maría").await.unwrap();
        assert_eq!(profile.username, "ana maría");
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (gw, http) = signed_in().await;
        http.set_response("DELETE", &url("/usuarios/me"), MockResponse::text(200, "ok"));

        gw.delete_account().await.unwrap();
        assert_eq!(http.requests_to("DELETE", "/usuarios/me").len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_old_password_is_a_form_error() {
        let (gw, http) = signed_in().await;
        http.set_response(
            "PUT",
            &url("/usuarios/password"),
            MockResponse::text(
                401,
                &json!({"message": "La contraseña antigua es incorrecta."}).to_string(),
            ),
        );

        let err = gw.update_password("wrong", "n").await.unwrap_err();
        assert!(!err.requires_reauth());
        assert_eq!(err.user_message(), "La contraseña antigua es incorrecta.");
        assert_eq!(err.error_code(), "E_AUTH_OLD_PASSWORD");
    }
}
