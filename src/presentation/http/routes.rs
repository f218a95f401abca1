//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{auth_middleware, optional_auth_middleware};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(user_routes(state.clone()))
        .merge(gym_routes(state.clone()))
        .merge(service_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(post_routes(state.clone()))
        .merge(cache_routes(state.clone()))
        .merge(ai_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Registration and login (anonymous allowed), user listing (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);
    let maybe = middleware::from_fn_with_state(state, optional_auth_middleware);

    Router::new()
        .route(
            "/api/users/register",
            post(handlers::auth::register).route_layer(maybe),
        )
        .route("/api/users/login", post(handlers::auth::login))
        .route(
            "/api/users",
            get(handlers::user::list_users).route_layer(auth),
        )
}

/// Gym routes; listing is open to anonymous callers
fn gym_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);
    let maybe = middleware::from_fn_with_state(state, optional_auth_middleware);

    Router::new()
        .route(
            "/api/gyms",
            get(handlers::gym::list_gyms)
                .route_layer(maybe)
                .merge(post(handlers::gym::create_gym).route_layer(auth.clone())),
        )
        .route(
            "/api/gyms/{gym_id}",
            get(handlers::gym::get_gym)
                .put(handlers::gym::update_gym)
                .delete(handlers::gym::delete_gym)
                .route_layer(auth),
        )
}

/// Service catalog routes (protected)
fn service_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/services",
            get(handlers::service::list_services).post(handlers::service::create_service),
        )
        .route(
            "/api/services/by-gym/{gym_id}",
            get(handlers::service::list_services_by_gym),
        )
        .route(
            "/api/services/{service_id}",
            get(handlers::service::get_service)
                .put(handlers::service::update_service)
                .delete(handlers::service::delete_service),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Appointment routes (protected)
fn appointment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::create_appointment),
        )
        .route(
            "/api/appointments/{appointment_id}",
            get(handlers::appointment::get_appointment)
                .delete(handlers::appointment::cancel_appointment),
        )
        .route(
            "/api/appointments/{appointment_id}/approve",
            post(handlers::appointment::approve_appointment),
        )
        .route(
            "/api/appointments/{appointment_id}/reject",
            post(handlers::appointment::reject_appointment),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Post routes; reads are open to anonymous callers
fn post_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);
    let maybe = middleware::from_fn_with_state(state, optional_auth_middleware);

    Router::new()
        .route(
            "/api/posts",
            get(handlers::post::list_posts)
                .route_layer(maybe.clone())
                .merge(post(handlers::post::create_post).route_layer(auth.clone())),
        )
        .route(
            "/api/posts/{post_id}",
            get(handlers::post::get_post).route_layer(maybe).merge(
                put(handlers::post::update_post)
                    .delete(handlers::post::delete_post)
                    .route_layer(auth),
            ),
        )
}

/// Cache proxy routes (protected, admin only)
fn cache_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/cache", post(handlers::cache::set_value))
        .route(
            "/api/cache/{key}",
            get(handlers::cache::get_value).delete(handlers::cache::delete_value),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn ai_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/ai/fitness-recommendation",
            post(handlers::ai::fitness_recommendation),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
