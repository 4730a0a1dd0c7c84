//! Integration tests for the sign-in / refresh / sign-out flow.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use helpers::{TestApp, field};

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;

    let response = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "username": "alice", "password": "Secret1!" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.str("access_token").is_empty());
    assert!(!response.str("refresh_token").is_empty());
    assert!(response.body.get("access_expires_at").is_some());
    assert!(response.body.get("refresh_expires_at").is_some());
}

#[tokio::test]
async fn test_sign_in_wrong_password_and_unknown_user() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "username": "alice", "password": "secret1!" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "username": "nobody", "password": "Secret1!" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.str("message"), "Invalid username or password");
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_sign_in_rejects_bad_payloads() {
    let app = TestApp::new();

    let empty = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "username": "", "password": "x" })),
            None,
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.str("error"), "VALIDATION");

    let malformed = app
        .send("POST", "/api/auth/sign-in", "{not json".to_string(), None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let missing_field = app
        .request(
            "POST",
            "/api/auth/sign-in",
            Some(json!({ "username": "alice" })),
            None,
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let first = field(&tokens, "refresh_token");

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_ne!(refreshed.str("refresh_token"), first);

    let replay = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": first })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::NOT_FOUND);
    assert_eq!(replay.str("error"), "TOKEN_NOT_FOUND");

    let again = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": refreshed.str("refresh_token") })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_refresh_token() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let refresh_token = field(&tokens, "refresh_token");

    app.clock.advance(Duration::seconds(601));

    let expired = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.str("error"), "TOKEN_EXPIRED");

    let gone = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_out() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let refresh_token = field(&tokens, "refresh_token");

    let response = app
        .request(
            "POST",
            "/api/auth/sign-out",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.sessions.is_empty());

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_out_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/sign-out",
            Some(json!({ "refresh_token": "does-not-exist" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let access_token = field(&tokens, "access_token");

    let me = app
        .request("GET", "/api/auth/me", None, Some(access_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user_id"], json!(alice));
    assert_eq!(me.body["role_id"], json!(app.cashier.id));
    assert_eq!(me.str("role"), "cashier");

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forged = app
        .request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_deleted_role() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;

    assert!(app.users.remove_role(app.cashier.id));

    let me = app
        .request("GET", "/api/auth/me", None, Some(field(&tokens, "access_token")))
        .await;
    assert_eq!(me.status, StatusCode::NOT_FOUND);
    assert_eq!(me.str("error"), "ROLE_NOT_FOUND");
}

#[tokio::test]
async fn test_me_rejects_malformed_authorization() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let access_token = field(&tokens, "access_token");

    for header in [
        format!("Basic {access_token}"),
        format!("Bearer {access_token} extra"),
        "Bearer ".to_string(),
        access_token.to_string(),
    ] {
        let response = app
            .request_with_authorization("GET", "/api/auth/me", None, Some(&header))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{header}");
    }
}

#[tokio::test]
async fn test_access_token_expires() {
    let app = TestApp::new();
    app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;
    let access_token = field(&tokens, "access_token");

    app.clock.advance(Duration::seconds(119));
    let live = app
        .request("GET", "/api/auth/me", None, Some(access_token))
        .await;
    assert_eq!(live.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(2));
    let expired = app
        .request("GET", "/api/auth/me", None, Some(access_token))
        .await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert_eq!(expired.str("error"), "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_deactivated_account_cannot_refresh() {
    let app = TestApp::new();
    let alice = app.create_test_user("alice", "Secret1!", app.cashier.id).await;
    let tokens = app.sign_in("alice", "Secret1!").await;

    app.users.set_active(alice, false);

    let response = app
        .request(
            "POST",
            "/api/auth/refresh-token",
            Some(json!({ "refresh_token": field(&tokens, "refresh_token") })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str("status"), "ok");
}
