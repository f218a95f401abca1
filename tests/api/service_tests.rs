//! Service catalog

use axum::http::StatusCode;
use gym_server::domain::Role;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_members_only_see_active_services_of_active_gyms() {
    let app = TestApp::new();
    let open = app.seed_gym("Open", true);
    let closed = app.seed_gym("Closed", false);
    app.seed_service(open.id, "Yoga", Decimal::new(20, 0));
    app.seed_service(closed.id, "Boxing", Decimal::new(30, 0));
    let retired = app.seed_service(open.id, "Aerobics", Decimal::new(10, 0));
    app.db
        .store
        .lock()
        .offerings
        .iter_mut()
        .filter(|s| s.id == retired.id)
        .for_each(|s| s.is_active = false);
    let member = app.seed_user("alice", Role::Member);

    let response = app.get_auth("/api/services", &app.token_for(&member)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Yoga");
    assert_eq!(json[0]["gym_name"], "Open");
}

#[tokio::test]
async fn test_admins_see_every_service() {
    let app = TestApp::new();
    let open = app.seed_gym("Open", true);
    let closed = app.seed_gym("Closed", false);
    app.seed_service(open.id, "Yoga", Decimal::new(20, 0));
    app.seed_service(closed.id, "Boxing", Decimal::new(30, 0));
    let admin = app.seed_user("root", Role::Admin);

    let response = app.get_auth("/api/services", &app.token_for(&admin)).await;

    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_service_in_inactive_gym_is_hidden() {
    let app = TestApp::new();
    let closed = app.seed_gym("Closed", false);
    let boxing = app.seed_service(closed.id, "Boxing", Decimal::new(30, 0));
    let member = app.seed_user("alice", Role::Member);

    let response = app
        .get_auth(&format!("/api/services/{}", boxing.id), &app.token_for(&member))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_services_by_gym() {
    let app = TestApp::new();
    let first = app.seed_gym("First", true);
    let second = app.seed_gym("Second", true);
    app.seed_service(first.id, "Yoga", Decimal::new(20, 0));
    app.seed_service(second.id, "Boxing", Decimal::new(30, 0));
    let member = app.seed_user("alice", Role::Member);

    let response = app
        .get_auth(
            &format!("/api/services/by-gym/{}", second.id),
            &app.token_for(&member),
        )
        .await;

    let json = json_body(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Boxing");
}

#[tokio::test]
async fn test_create_service_serializes_price_as_number() {
    let app = TestApp::new();
    let gym = app.seed_gym("Open", true);
    let admin = app.seed_user("root", Role::Admin);
    let body = json!({
        "name": "Pilates",
        "price": 42.5,
        "duration_minutes": 45,
        "gym_id": gym.id
    });

    let response = app
        .post_json_auth("/api/services", &body, &app.token_for(&admin))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["price"], json!(42.5));
    assert_eq!(json["duration_minutes"], 45);
}

#[tokio::test]
async fn test_create_service_for_missing_gym_is_not_found() {
    let app = TestApp::new();
    let admin = app.seed_user("root", Role::Admin);
    let body = json!({
        "name": "Pilates",
        "price": 10,
        "duration_minutes": 45,
        "gym_id": 999
    });

    let response = app
        .post_json_auth("/api/services", &body, &app.token_for(&admin))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let app = TestApp::new();
    let gym = app.seed_gym("Open", true);
    let admin = app.seed_user("root", Role::Admin);
    let body = json!({
        "name": "Pilates",
        "price": -1,
        "duration_minutes": 45,
        "gym_id": gym.id
    });

    let response = app
        .post_json_auth("/api/services", &body, &app.token_for(&admin))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trainers_cannot_manage_the_catalog() {
    let app = TestApp::new();
    let gym = app.seed_gym("Open", true);
    let yoga = app.seed_service(gym.id, "Yoga", Decimal::new(20, 0));
    let trainer = app.seed_user("coach", Role::Trainer);

    let response = app
        .delete_auth(&format!("/api/services/{}", yoga.id), &app.token_for(&trainer))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_and_delete_service() {
    let app = TestApp::new();
    let gym = app.seed_gym("Open", true);
    let yoga = app.seed_service(gym.id, "Yoga", Decimal::new(20, 0));
    let admin = app.seed_user("root", Role::Admin);
    let token = app.token_for(&admin);
    let uri = format!("/api/services/{}", yoga.id);
    let body = json!({
        "name": "Hot Yoga",
        "price": 25,
        "duration_minutes": 90,
        "gym_id": gym.id
    });

    let response = app.put_json_auth(&uri, &body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Hot Yoga");

    let response = app.delete_auth(&uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get_auth(&uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
