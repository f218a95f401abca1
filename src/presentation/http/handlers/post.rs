//! Post Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::PostRequest;
use crate::application::dto::response::{MessageResponse, PostResponse};
use crate::application::services::{PostInput, PostService};
use crate::presentation::middleware::{AuthUser, MaybeAuthUser};
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

impl From<PostRequest> for PostInput {
    fn from(body: PostRequest) -> Self {
        Self {
            title: body.title,
            content: body.content,
            visibility: body.visibility,
        }
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(caller): Extension<MaybeAuthUser>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.post_service().list(caller.actor().as_ref()).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Get a single post, served from cache when possible
pub async fn get_post(
    State(state): State<AppState>,
    Extension(caller): Extension<MaybeAuthUser>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state
        .post_service()
        .get(caller.actor().as_ref(), post_id)
        .await?;
    Ok(Json(post.into()))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    validate_request(&body)?;

    let post = state
        .post_service()
        .create(&auth.actor(), body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<i64>,
    Json(body): Json<PostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    validate_request(&body)?;

    let post = state
        .post_service()
        .update(&auth.actor(), post_id, body.into())
        .await?;

    Ok(Json(post.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(post_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.post_service().delete(&auth.actor(), post_id).await?;
    Ok(Json(MessageResponse::new("Post deleted")))
}
