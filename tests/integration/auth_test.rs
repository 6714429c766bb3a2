//! Integration tests for the authentication flow.

mod helpers;

use axum::http::StatusCode;

use helpers::{PASSWORD, TestApp, unique_email};

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let Some(app) = TestApp::new().await else { return };
    let email = unique_email("alice");

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "  Alice  ",
                "email": email,
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.string("/user/name"), "Alice");
    assert_eq!(response.string("/user/email"), email);
    assert!(response.body["user"].get("passwordHash").is_none());
    assert!(response.body.get("accessToken").is_some());
    assert!(response.body.get("refreshToken").is_some());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("bob").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Bob Again",
                "email": user.email,
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["statusCode"], 409);
    assert_eq!(response.body["path"], "/api/auth/register");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.body["errors"]
        .as_array()
        .expect("validation errors listed");
    assert!(errors.iter().any(|e| e.as_str() == Some("email must be an email")));
    assert!(errors.iter().any(|e| e.as_str() == Some("name should not be empty")));
}

#[tokio::test]
async fn test_register_short_password() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "name": "Shorty",
                "email": unique_email("shorty"),
                "password": "abc",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("carol").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": user.email,
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_same_message() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": unique_email("nobody"),
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid credentials");
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("dave").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rotated = response.string("/refreshToken");
    assert_ne!(rotated, user.refresh_token);

    // The consumed token cannot be replayed
    let replay = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);

    // The new one still works
    let next = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": rotated })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_refresh_token_rejected() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("dora").await;

    sqlx::query("UPDATE refresh_tokens SET expires_at = NOW() - INTERVAL '1 minute' WHERE user_id = $1")
        .bind(user.id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to backdate refresh token");

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("erin").await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Logged out successfully");

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    // Logging out twice is not an error
    let again = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refreshToken": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("frank").await;

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.message(), "Missing Authorization header");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let me = app
        .request("GET", "/api/auth/me", None, Some(&user.access_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.uuid("/id"), user.id);
}

#[tokio::test]
async fn test_health_check() {
    let Some(app) = TestApp::new().await else { return };

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.string("/status"), "ok");
    assert_eq!(response.string("/database"), "connected");
}

#[tokio::test]
async fn test_unknown_route_envelope() {
    let Some(app) = TestApp::new().await else { return };

    let response = app.request("GET", "/api/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["statusCode"], 404);
    assert_eq!(response.body["path"], "/api/nope");
    assert!(response.body.get("timestamp").is_some());
}
