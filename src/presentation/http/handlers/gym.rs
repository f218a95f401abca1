//! Gym Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::GymRequest;
use crate::application::dto::response::{GymResponse, MessageResponse};
use crate::application::services::{GymInput, GymService};
use crate::presentation::middleware::{AuthUser, MaybeAuthUser};
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

impl From<GymRequest> for GymInput {
    fn from(body: GymRequest) -> Self {
        Self {
            name: body.name,
            address: body.address,
            phone_number: body.phone_number,
            is_active: body.is_active,
        }
    }
}

/// List gyms; inactive ones are only shown to admins
pub async fn list_gyms(
    State(state): State<AppState>,
    Extension(caller): Extension<MaybeAuthUser>,
) -> Result<Json<Vec<GymResponse>>, AppError> {
    let gyms = state.gym_service().list(caller.actor().as_ref()).await?;
    Ok(Json(gyms.into_iter().map(GymResponse::from).collect()))
}

/// Get gym by ID
pub async fn get_gym(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(gym_id): Path<i64>,
) -> Result<Json<GymResponse>, AppError> {
    let gym = state.gym_service().get(&auth.actor(), gym_id).await?;
    Ok(Json(gym.into()))
}

pub async fn create_gym(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<GymRequest>,
) -> Result<(StatusCode, Json<GymResponse>), AppError> {
    validate_request(&body)?;

    let gym = state
        .gym_service()
        .create(&auth.actor(), body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(gym.into())))
}

pub async fn update_gym(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(gym_id): Path<i64>,
    Json(body): Json<GymRequest>,
) -> Result<Json<GymResponse>, AppError> {
    validate_request(&body)?;

    let gym = state
        .gym_service()
        .update(&auth.actor(), gym_id, body.into())
        .await?;

    Ok(Json(gym.into()))
}

pub async fn delete_gym(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(gym_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.gym_service().delete(&auth.actor(), gym_id).await?;
    Ok(Json(MessageResponse::new("Gym deleted")))
}
