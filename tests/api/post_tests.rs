//! Posts and the cache-aside read path

use axum::http::StatusCode;
use gym_server::domain::{PostVisibility, Role};
use gym_server::infrastructure::cache::keys;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_read_populates_cache_then_hits_it() {
    let app = TestApp::new();
    let post = app.seed_post("Opening hours", PostVisibility::Public);
    let key = keys::post(post.id);
    let uri = format!("/api/posts/{}", post.id);

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Opening hours");
    assert_eq!(app.cache.misses(&key), 1);
    assert_eq!(*app.cache.writes.lock(), vec![(key.clone(), Some(300))]);

    // Served from cache even once the row is gone.
    app.db.store.lock().posts.clear();

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["title"], "Opening hours");
    assert_eq!(app.cache.hits(&key), 1);
}

#[tokio::test]
async fn test_update_invalidates_cached_post() {
    let app = TestApp::new();
    let post = app.seed_post("Old title", PostVisibility::Public);
    let admin = app.seed_user("root", Role::Admin);
    let key = keys::post(post.id);
    let uri = format!("/api/posts/{}", post.id);

    app.get(&uri).await;
    assert!(app.cache.value(&key).is_some());

    let body = json!({ "title": "New title", "content": "Updated" });
    let response = app.put_json_auth(&uri, &body, &app.token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.cache.value(&key).is_none());

    let response = app.get(&uri).await;
    assert_eq!(json_body(response).await["title"], "New title");
}

#[tokio::test]
async fn test_delete_invalidates_cached_post() {
    let app = TestApp::new();
    let post = app.seed_post("Short lived", PostVisibility::Public);
    let admin = app.seed_user("root", Role::Admin);
    let uri = format!("/api/posts/{}", post.id);

    app.get(&uri).await;
    let response = app.delete_auth(&uri, &app.token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(app.cache.value(&keys::post(post.id)).is_none());
    assert_eq!(app.get(&uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_private_post_is_forbidden_to_non_admins() {
    let app = TestApp::new();
    let post = app.seed_post("Staff only", PostVisibility::Private);
    let member = app.seed_user("alice", Role::Member);
    let uri = format!("/api/posts/{}", post.id);

    assert_eq!(app.get(&uri).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        app.get_auth(&uri, &app.token_for(&member)).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_visibility_is_checked_on_cache_hits() {
    let app = TestApp::new();
    let post = app.seed_post("Staff only", PostVisibility::Private);
    let admin = app.seed_user("root", Role::Admin);
    let uri = format!("/api/posts/{}", post.id);

    let response = app.get_auth(&uri, &app.token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.cache.hits(&keys::post(post.id)), 1);
}

#[tokio::test]
async fn test_listing_hides_private_posts_from_non_admins() {
    let app = TestApp::new();
    app.seed_post("News", PostVisibility::Public);
    app.seed_post("Staff only", PostVisibility::Private);
    let admin = app.seed_user("root", Role::Admin);

    let json = json_body(app.get("/api/posts").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "News");

    let json = json_body(app.get_auth("/api/posts", &app.token_for(&admin)).await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_listing_is_not_found() {
    let app = TestApp::new();
    app.seed_post("Staff only", PostVisibility::Private);

    let response = app.get("/api/posts").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_admins_write_posts() {
    let app = TestApp::new();
    let trainer = app.seed_user("coach", Role::Trainer);
    let admin = app.seed_user("root", Role::Admin);
    let body = json!({ "title": "Hello", "content": "World", "visibility": "Private" });

    let response = app
        .post_json_auth("/api/posts", &body, &app.token_for(&trainer))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .post_json_auth("/api/posts", &body, &app.token_for(&admin))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["visibility"], "Private");
}

#[tokio::test]
async fn test_creating_a_post_requires_authentication() {
    let app = TestApp::new();
    let body = json!({ "title": "Hello", "content": "World" });

    let response = app.post_json("/api/posts", &body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
