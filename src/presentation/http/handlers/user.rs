//! User Handlers

use axum::{extract::State, Extension, Json};

use crate::application::dto::response::UserResponse;
use crate::application::services::UserService;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List all users (admins and trainers)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service().list(&auth.actor()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
