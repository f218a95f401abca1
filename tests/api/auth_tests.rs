//! Registration, login and token handling

use axum::http::StatusCode;
use gym_server::domain::Role;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{json_body, TestApp, TEST_PASSWORD};

fn registration(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "ValidPassword123!"
    })
}

#[tokio::test]
async fn test_register_with_valid_data() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/users/register", &registration("alice"))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["role"], "Member");
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_with_invalid_email_fails() {
    let app = TestApp::new();
    let body = json!({
        "username": "alice",
        "email": "not-an-email",
        "password": "ValidPassword123!"
    });

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["code"], 10007);
    assert_eq!(json["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_register_with_short_password_fails() {
    let app = TestApp::new();
    let body = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "short"
    });

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_with_duplicate_email_fails() {
    let app = TestApp::new();
    app.seed_user("alice", Role::Member);

    let response = app
        .post_json("/api/users/register", &registration("alice"))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_with_unknown_gym_fails() {
    let app = TestApp::new();
    let mut body = registration("alice");
    body["gym_id"] = json!(999);

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_with_unknown_role_fails() {
    let app = TestApp::new();
    let mut body = registration("alice");
    body["role"] = json!("Owner");

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_caller_cannot_register_an_admin() {
    let app = TestApp::new();
    let mut body = registration("mallory");
    body["role"] = json!("Admin");

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_register_an_admin() {
    let app = TestApp::new();
    let admin = app.seed_user("root", Role::Admin);
    let token = app.token_for(&admin);
    let mut body = registration("deputy");
    body["role"] = json!("Admin");

    let response = app
        .post_json_auth("/api/users/register", &body, &token)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["role"], "Admin");
}

#[tokio::test]
async fn test_anyone_can_register_a_trainer() {
    let app = TestApp::new();
    let mut body = registration("coach");
    body["role"] = json!("Trainer");

    let response = app.post_json("/api/users/register", &body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["role"], "Trainer");
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new();
    app.seed_user_with_password("alice", Role::Member);

    for identifier in ["alice", "alice@example.com"] {
        let body = json!({ "username": identifier, "password": TEST_PASSWORD });
        let response = app.post_json("/api/users/login", &body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(token.split('.').count(), 3);
    }
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new();
    app.seed_user_with_password("alice", Role::Member);
    let body = json!({ "username": "alice", "password": "WrongPassword!" });

    let response = app.post_json("/api/users/login", &body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_issued_token_authenticates_requests() {
    let app = TestApp::new();
    app.seed_user_with_password("coach", Role::Trainer);
    let body = json!({ "username": "coach", "password": TEST_PASSWORD });
    let token = json_body(app.post_json("/api/users/login", &body).await).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app.get_auth("/api/users", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let response = app.get("/api/users").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();

    let response = app.get_auth("/api/users", "not.a.token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_members_cannot_list_users() {
    let app = TestApp::new();
    let member = app.seed_user("alice", Role::Member);

    let response = app.get_auth("/api/users", &app.token_for(&member)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_listing_carries_gym_name() {
    let app = TestApp::new();
    let gym = app.seed_gym("Downtown", true);
    let admin = app.seed_user("root", Role::Admin);
    app.db
        .store
        .lock()
        .users
        .iter_mut()
        .for_each(|u| u.gym_id = Some(gym.id));

    let response = app.get_auth("/api/users", &app.token_for(&admin)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json[0]["gym_name"], "Downtown");
}
