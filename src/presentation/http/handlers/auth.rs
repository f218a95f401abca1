//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{TokenResponse, UserResponse};
use crate::application::services::{AuthService, Registration, UserService};
use crate::presentation::middleware::MaybeAuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Extension(caller): Extension<MaybeAuthUser>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    validate_request(&body)?;

    let registration = Registration {
        username: body.username,
        email: body.email,
        password: body.password,
        bio: body.bio,
        role: body.role,
        gym_id: body.gym_id,
    };

    let user = state
        .user_service()
        .register(caller.actor().as_ref(), registration)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login with username or email
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    validate_request(&body)?;

    let token = state
        .auth_service()
        .login(&body.username, &body.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
