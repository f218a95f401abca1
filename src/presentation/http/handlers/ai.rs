//! Fitness Recommendation Handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::application::dto::request::FitnessRequest;
use crate::application::dto::response::RecommendationResponse;
use crate::application::services::{FitnessProfile, RecommendationService};
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Generate a training and diet plan.
///
/// Transport failures are reported in the `{success, message}` envelope
/// rather than the generic error body.
pub async fn fitness_recommendation(
    State(state): State<AppState>,
    Json(body): Json<FitnessRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&body)?;

    let profile = FitnessProfile {
        height: body.height,
        weight: body.weight,
        body_type: body.body_type,
        goal: body.goal,
    };

    let response = match state.recommendation_service().recommend(&profile).await {
        Ok(text) => (StatusCode::OK, Json(RecommendationResponse::success(text))),
        Err(e) => {
            tracing::error!(error = %e, "Fitness recommendation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RecommendationResponse::failure(format!(
                    "An error occurred: {}",
                    e
                ))),
            )
        }
    };

    Ok(response)
}
