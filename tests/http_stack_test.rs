//! End-to-end tests over the production stack: reqwest transport, file
//! token store, and a wiremock backend.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gastrolog::app::{Action, App, View};
use gastrolog::models::PhotoUpload;
use gastrolog::startup::{build_gateway, AppConfig};
use gastrolog::state::{LoginForm, RegisterForm};

struct Stack {
    server: MockServer,
    dir: TempDir,
}

impl Stack {
    async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn config(&self) -> AppConfig {
        AppConfig::default()
            .with_api_base_url(format!("{}/api", self.server.uri()))
            .with_token_path(self.dir.path().join("token.json"))
    }

    /// A fresh client process against the same backend and token file.
    fn app(&self) -> App {
        let config = self.config();
        App::new(Arc::new(build_gateway(&config).unwrap()), &config)
    }

    async fn mount_login(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "ana@b.com", "pwd": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(token))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/perfil/me"))
            .and(header("Authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nombreUsuario": "ana",
                "email": "ana@b.com",
                "seguidoresCount": 3
            })))
            .mount(&self.server)
            .await;
    }
}

fn ana() -> LoginForm {
    LoginForm {
        email: "ana@b.com".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn test_login_persists_the_token_for_the_next_run() {
    let stack = Stack::start().await;
    stack.mount_login("jwt-w").await;

    let mut app = stack.app();
    app.dispatch(Action::Login(ana()));
    app.settle().await;
    assert_eq!(app.view, View::Home);
    assert_eq!(app.profile.as_ref().map(|p| p.followers_count), Some(3));

    let saved = std::fs::read_to_string(stack.dir.path().join("token.json")).unwrap();
    assert!(saved.contains("jwt-w"));

    let mut next_run = stack.app();
    next_run.dispatch(Action::ResumeSession);
    next_run.settle().await;
    assert_eq!(next_run.view, View::Home);
    assert!(next_run.is_signed_in());
}

#[tokio::test]
async fn test_logout_removes_the_saved_token() {
    let stack = Stack::start().await;
    stack.mount_login("jwt-w").await;

    let mut app = stack.app();
    app.dispatch(Action::Login(ana()));
    app.settle().await;
    app.dispatch(Action::Logout);
    app.settle().await;
    assert_eq!(app.view, View::Welcome);

    let mut next_run = stack.app();
    next_run.dispatch(Action::ResumeSession);
    next_run.settle().await;
    assert!(!next_run.is_signed_in());
}

#[tokio::test]
async fn test_registration_conflict_shows_the_server_message() {
    let stack = Stack::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "El email ya existe"})),
        )
        .expect(1)
        .mount(&stack.server)
        .await;

    let mut app = stack.app();
    app.dispatch(Action::Continue);
    app.dispatch(Action::ShowRegister);
    app.dispatch(Action::Register(RegisterForm {
        username: "ana".to_string(),
        email: "ana@b.com".to_string(),
        password: "x".to_string(),
        confirm_password: "x".to_string(),
    }));
    app.settle().await;

    assert_eq!(app.view, View::Register);
    assert_eq!(
        app.error.as_deref(),
        Some("Registration failed: El email ya existe")
    );
}

#[tokio::test]
async fn test_restaurant_search_sends_the_filters() {
    let stack = Stack::start().await;
    stack.mount_login("jwt-w").await;
    Mock::given(method("GET"))
        .and(path("/api/restaurantes/externos/buscar"))
        .and(query_param("ciudad", "A Coruña"))
        .and(query_param("page", "0"))
        .and(header("Authorization", "Bearer jwt-w"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 5, "tags": {"name": "O Lar"}}],
            "number": 0,
            "totalPages": 1,
            "first": true,
            "last": true
        })))
        .expect(1)
        .mount(&stack.server)
        .await;

    let mut app = stack.app();
    app.dispatch(Action::Login(ana()));
    app.settle().await;
    app.dispatch(Action::SearchRestaurants(gastrolog::models::RestaurantFilter {
        city: "A Coruña".to_string(),
        ..Default::default()
    }));
    app.settle().await;

    assert_eq!(app.view, View::RestaurantResults);
    let names: Vec<_> = app
        .restaurant_results
        .iter()
        .flat_map(|p| p.content.iter().map(|r| r.display_name().to_string()))
        .collect();
    assert_eq!(names, vec!["O Lar".to_string()]);
}

#[tokio::test]
async fn test_review_upload_is_multipart() {
    let stack = Stack::start().await;
    stack.mount_login("jwt-w").await;
    Mock::given(method("POST"))
        .and(path("/api/valoraciones/usuario/ana"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&stack.server)
        .await;

    let mut app = stack.app();
    app.dispatch(Action::Login(ana()));
    app.settle().await;
    app.dispatch(Action::OpenRestaurant(
        gastrolog::state::RestaurantRef::External(
            gastrolog::models::ExternalRestaurant::new(5)
                .with_tag("name", "O Lar")
                .with_tag("addr:city", "Lugo"),
        ),
    ));
    app.dispatch(Action::StartReview);
    app.dispatch(Action::SetRating(5));
    app.dispatch(Action::AddReviewPhotos(vec![PhotoUpload::new(
        "plato.jpg",
        vec![0xFF, 0xD8, 0xFF],
    )]));
    app.dispatch(Action::SubmitReview);
    app.settle().await;

    assert_eq!(app.notice.as_deref(), Some("Review published."));
    assert!(app.review_form.photos.is_empty());
}
