//! Fitness recommendation endpoint

use axum::http::StatusCode;
use gym_server::application::services::recommendation_service::{
    QUOTA_EXCEEDED, UPSTREAM_FAILED,
};
use gym_server::application::services::Generation;
use gym_server::domain::Role;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{json_body, StubGenerator, TestApp};

fn profile() -> Value {
    json!({
        "height": "180",
        "weight": "82",
        "body_type": "mesomorph",
        "goal": "build muscle"
    })
}

async fn recommend(app: &TestApp, body: &Value) -> axum::response::Response {
    let member = app.seed_user("alice", Role::Member);
    app.post_json_auth("/api/ai/fitness-recommendation", body, &app.token_for(&member))
        .await
}

#[tokio::test]
async fn test_recommendation_is_returned() {
    let app = TestApp::with_generator(StubGenerator::replying(Generation::Text(
        "Lift heavy.".into(),
    )));

    let response = recommend(&app, &profile()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "recommendation": "Lift heavy." })
    );
    let prompts = app.generator.prompts.lock();
    assert!(prompts[0].contains("build muscle"));
    assert!(prompts[0].contains("180"));
}

#[tokio::test]
async fn test_quota_rejection_becomes_fallback_text() {
    let app = TestApp::with_generator(StubGenerator::replying(Generation::Rejected {
        status: 429,
        body: "Quota exceeded for this project".into(),
    }));

    let response = recommend(&app, &profile()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["recommendation"], QUOTA_EXCEEDED);
}

#[tokio::test]
async fn test_other_rejection_becomes_generic_fallback() {
    let app = TestApp::with_generator(StubGenerator::replying(Generation::Rejected {
        status: 500,
        body: "internal".into(),
    }));

    let response = recommend(&app, &profile()).await;

    assert_eq!(json_body(response).await["recommendation"], UPSTREAM_FAILED);
}

#[tokio::test]
async fn test_transport_failure_is_reported_in_envelope() {
    let app = TestApp::with_generator(StubGenerator::failing());

    let response = recommend(&app, &profile()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_empty_field_is_rejected() {
    let app = TestApp::new();
    let mut body = profile();
    body["goal"] = json!("");

    let response = recommend(&app, &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.generator.prompts.lock().is_empty());
}

#[tokio::test]
async fn test_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/ai/fitness-recommendation", &profile())
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
