//! Integration tests for the account lifecycle.
//!
//! These tests drive [`App`] through the mock transport:
//! - sign in, sign out and resuming a saved session
//! - a token the server no longer accepts
//! - registration and password recovery

mod common;

use common::{profile_json, url, Harness};
use gastrolog::adapters::MockResponse;
use gastrolog::app::{Action, View};
use gastrolog::state::{LoginForm, RegisterForm, ResetPasswordForm};
use gastrolog::startup::StartupParams;

#[tokio::test]
async fn test_login_flow_reaches_home_with_profile() {
    let mut h = Harness::signed_out();
    h.http
        .set_response("POST", &url("/auth/login"), MockResponse::text(200, "jwt-9"));
    h.http.set_response(
        "GET",
        &url("/perfil/me"),
        MockResponse::json(profile_json("ana")),
    );

    h.app.dispatch(Action::Continue);
    h.app.dispatch(Action::ShowLogin);
    assert_eq!(h.app.view, View::Login);

    h.app.dispatch(Action::Login(LoginForm {
        email: "a@b.com".to_string(),
        password: "x".to_string(),
    }));
    h.app.settle().await;

    assert_eq!(h.app.view, View::Home);
    assert!(h.app.is_signed_in());
    assert_eq!(h.tokens.get_token(), Some("jwt-9".to_string()));
    assert_eq!(
        h.app.profile.as_ref().map(|p| p.username.as_str()),
        Some("ana")
    );

    let profile_request = &h.http.requests_to("GET", "/perfil/me")[0];
    assert_eq!(
        profile_request.headers.get("Authorization").map(String::as_str),
        Some("Bearer jwt-9")
    );
}

#[tokio::test]
async fn test_bad_credentials_stay_on_login() {
    let mut h = Harness::signed_out();
    h.http
        .set_response("POST", &url("/auth/login"), MockResponse::status(401));
    h.app.dispatch(Action::ShowLogin);

    h.app.dispatch(Action::Login(LoginForm {
        email: "a@b.com".to_string(),
        password: "wrong".to_string(),
    }));
    h.app.settle().await;

    assert_eq!(h.app.view, View::Login);
    assert!(h.app.error.is_some());
    assert!(!h.app.is_signed_in());
    assert_eq!(h.tokens.get_token(), None);
}

#[tokio::test]
async fn test_logout_forgets_everything() {
    let mut h = Harness::signed_in("ana").await;
    assert!(h.app.profile.is_some());

    h.app.dispatch(Action::Logout);
    h.app.settle().await;

    assert_eq!(h.app.view, View::Welcome);
    assert!(!h.app.is_signed_in());
    assert!(h.app.profile.is_none());
    assert!(h.app.favorite_index().is_empty());
    assert_eq!(h.tokens.get_token(), None);

    // Session views are out of reach again.
    h.app.dispatch(Action::ShowFeed);
    h.app.settle().await;
    assert_eq!(h.app.view, View::Welcome);
    assert!(h.http.requests_to("GET", "/valoraciones/feed").is_empty());
}

#[tokio::test]
async fn test_login_right_after_logout_keeps_the_new_token() {
    let mut h = Harness::signed_in("ana").await;
    h.http
        .set_response("POST", &url("/auth/login"), MockResponse::text(200, "jwt-2"));

    h.app.dispatch(Action::Logout);
    h.app.dispatch(Action::ShowLogin);
    h.app.dispatch(Action::Login(LoginForm {
        email: "ana@example.com".to_string(),
        password: "secret".to_string(),
    }));
    h.app.settle().await;

    assert_eq!(h.app.view, View::Home);
    assert!(h.app.is_signed_in());
    assert_eq!(h.tokens.get_token(), Some("jwt-2".to_string()));
}

#[tokio::test]
async fn test_resume_saved_session() {
    let mut h = Harness::with_saved_token("jwt-old");
    h.http.set_response(
        "GET",
        &url("/perfil/me"),
        MockResponse::json(profile_json("ana")),
    );

    h.app.dispatch(Action::ResumeSession);
    h.app.settle().await;

    assert_eq!(h.app.view, View::Home);
    assert!(h.app.is_signed_in());
}

#[tokio::test]
async fn test_rejected_token_ends_the_session() {
    let mut h = Harness::signed_in("ana").await;
    h.http
        .set_response("GET", &url("/valoraciones/feed"), MockResponse::status(401));

    h.app.dispatch(Action::ShowFeed);
    h.app.settle().await;

    assert_eq!(h.app.view, View::Welcome);
    assert!(!h.app.is_signed_in());
    assert!(h.app.error.is_some());
    assert_eq!(h.tokens.get_token(), None);
}

#[tokio::test]
async fn test_register_then_verify_notice() {
    let mut h = Harness::signed_out();
    h.http
        .set_response("POST", &url("/auth/register"), MockResponse::status(201));
    h.app.dispatch(Action::Continue);
    h.app.dispatch(Action::ShowRegister);

    h.app.dispatch(Action::Register(RegisterForm {
        username: "ana".to_string(),
        email: "a@b.com".to_string(),
        password: "x".to_string(),
        confirm_password: "y".to_string(),
    }));
    h.app.settle().await;
    assert_eq!(h.app.view, View::Register);
    assert!(h.http.get_requests().is_empty());

    h.app.dispatch(Action::Register(RegisterForm {
        username: "ana".to_string(),
        email: "a@b.com".to_string(),
        password: "x".to_string(),
        confirm_password: "x".to_string(),
    }));
    h.app.settle().await;
    assert_eq!(h.app.view, View::Login);
    assert!(h.app.notice.is_some());
}

#[tokio::test]
async fn test_forgot_password_never_reveals_the_outcome() {
    let mut ok = Harness::signed_out();
    ok.http.set_response(
        "POST",
        &url("/auth/forgot-password"),
        MockResponse::status(200),
    );
    let mut missing = Harness::signed_out();
    missing.http.set_response(
        "POST",
        &url("/auth/forgot-password"),
        MockResponse::status(404),
    );

    for h in [&mut ok, &mut missing] {
        h.app.dispatch(Action::ShowLogin);
        h.app.dispatch(Action::ShowForgotPassword);
        h.app.dispatch(Action::ForgotPassword {
            email: "who@b.com".to_string(),
        });
        h.app.settle().await;
    }

    assert_eq!(ok.app.view, View::Login);
    assert_eq!(missing.app.view, View::Login);
    assert_eq!(ok.app.notice, missing.app.notice);
    assert!(missing.app.error.is_none());
}

#[tokio::test]
async fn test_reset_link_flow() {
    let h = Harness::signed_out();
    let mut app = h
        .app
        .with_startup(StartupParams::from_url(
            "http://localhost:3000/reset-password?token=abc%2D1",
        ));
    h.http.set_response(
        "POST",
        &url("/auth/reset-password"),
        MockResponse::status(200),
    );
    assert_eq!(app.view, View::ResetPassword);

    app.dispatch(Action::ResetPassword(ResetPasswordForm {
        password: "n".to_string(),
        confirm_password: "n".to_string(),
    }));
    app.settle().await;

    assert_eq!(app.view, View::Login);
    assert!(!app.has_reset_token());
    let request = &h.http.requests_to("POST", "/auth/reset-password")[0];
    assert!(request.url.ends_with("/auth/reset-password?token=abc-1"));
    assert_eq!(
        request.json_body().map(|b| b["pwd"].clone()),
        Some(serde_json::json!("n"))
    );
}
