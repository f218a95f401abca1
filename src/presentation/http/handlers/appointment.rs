//! Appointment Handlers
//!
//! Booking, listing and the approve/reject/cancel lifecycle.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::application::dto::request::CreateAppointmentRequest;
use crate::application::dto::response::AppointmentResponse;
use crate::application::services::{AppointmentService, NewAppointment};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Book an appointment. Status and price in the body are ignored.
pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    validate_request(&body)?;

    if body.status.is_some() || body.price.is_some() {
        tracing::debug!(user_id = auth.user_id, "Ignoring client-supplied status/price");
    }

    let request = NewAppointment {
        date: body.date,
        time: body.time,
        member_id: body.member_id,
        trainer_id: body.trainer_id,
        service_id: body.service_id,
        gym_id: body.gym_id,
    };

    let appointment = state
        .appointment_service()
        .create(&auth.actor(), request)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment.into())))
}

/// Appointments visible to the caller
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments = state.appointment_service().list(&auth.actor()).await?;
    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from)
            .collect(),
    ))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state
        .appointment_service()
        .get(&auth.actor(), appointment_id)
        .await?;
    Ok(Json(appointment.into()))
}

pub async fn approve_appointment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state
        .appointment_service()
        .approve(&auth.actor(), appointment_id)
        .await?;
    Ok(Json(appointment.into()))
}

pub async fn reject_appointment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state
        .appointment_service()
        .reject(&auth.actor(), appointment_id)
        .await?;
    Ok(Json(appointment.into()))
}

/// Cancel an appointment (trainer who booked it, or admin)
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(appointment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .appointment_service()
        .cancel(&auth.actor(), appointment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
