//! Authentication Middleware
//!
//! Bearer-token validation for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::application::services::AuthService;
use crate::domain::{Actor, Role};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// The caller as seen by the domain layer.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.username.clone(), self.role)
    }
}

impl From<Actor> for AuthUser {
    fn from(actor: Actor) -> Self {
        Self {
            user_id: actor.user_id,
            username: actor.username,
            role: actor.role,
        }
    }
}

/// Extension set by [`optional_auth_middleware`]; `None` for anonymous callers.
#[derive(Debug, Clone, Default)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn actor(&self) -> Option<Actor> {
        self.0.as_ref().map(AuthUser::actor)
    }
}

fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))
}

fn authenticate(state: &AppState, request: &Request) -> Result<AuthUser, AppError> {
    let token = bearer_token(request)?;
    let actor = state.auth_service().verify_token(token)?;
    Ok(actor.into())
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&state, &request)?;
    tracing::debug!(user_id = user.user_id, role = %user.role, "Request authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Optional authentication middleware (doesn't fail on a missing or bad token)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = authenticate(&state, &request).ok();

    request.extensions_mut().insert(MaybeAuthUser(user));
    next.run(request).await
}
