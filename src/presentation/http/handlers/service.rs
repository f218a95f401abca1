//! Service Catalog Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::ServiceRequest;
use crate::application::dto::response::{MessageResponse, ServiceResponse};
use crate::application::services::{CatalogService, OfferingInput};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

impl From<ServiceRequest> for OfferingInput {
    fn from(body: ServiceRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            service_type: body.service_type,
            price: body.price,
            duration_minutes: body.duration_minutes,
            gym_id: body.gym_id,
            is_active: body.is_active,
        }
    }
}

pub async fn list_services(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = state.catalog_service().list(&auth.actor()).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

pub async fn get_service(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(service_id): Path<i64>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = state
        .catalog_service()
        .get(&auth.actor(), service_id)
        .await?;
    Ok(Json(service.into()))
}

/// Active services of an active gym
pub async fn list_services_by_gym(
    State(state): State<AppState>,
    Path(gym_id): Path<i64>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = state.catalog_service().list_by_gym(gym_id).await?;
    Ok(Json(services.into_iter().map(ServiceResponse::from).collect()))
}

pub async fn create_service(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), AppError> {
    validate_request(&body)?;

    let service = state
        .catalog_service()
        .create(&auth.actor(), body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(service.into())))
}

pub async fn update_service(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(service_id): Path<i64>,
    Json(body): Json<ServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    validate_request(&body)?;

    let service = state
        .catalog_service()
        .update(&auth.actor(), service_id, body.into())
        .await?;

    Ok(Json(service.into()))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(service_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.catalog_service().delete(&auth.actor(), service_id).await?;
    Ok(Json(MessageResponse::new("Service deleted")))
}
