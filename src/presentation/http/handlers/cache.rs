//! Cache Proxy Handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::application::dto::request::CacheSetRequest;
use crate::application::dto::response::{CacheEntryResponse, CacheKeyResponse};
use crate::application::services::CacheProxyService;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

pub async fn get_value(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<Json<CacheEntryResponse>, AppError> {
    let value = state.cache_proxy_service().get(&auth.actor(), &key).await?;
    Ok(Json(CacheEntryResponse { key, value }))
}

pub async fn set_value(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CacheSetRequest>,
) -> Result<Json<CacheKeyResponse>, AppError> {
    validate_request(&body)?;

    state
        .cache_proxy_service()
        .set(&auth.actor(), &body.key, &body.value, body.expiration_minutes)
        .await?;

    Ok(Json(CacheKeyResponse {
        message: "Value stored".into(),
        key: body.key,
    }))
}

pub async fn delete_value(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(key): Path<String>,
) -> Result<Json<CacheKeyResponse>, AppError> {
    state
        .cache_proxy_service()
        .delete(&auth.actor(), &key)
        .await?;

    Ok(Json(CacheKeyResponse {
        message: "Value removed".into(),
        key,
    }))
}
