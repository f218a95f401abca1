//! User Service
//!
//! Registration, user listing and the startup admin account.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::auth_service::hash_password;
use crate::config::BootstrapSettings;
use crate::domain::{
    AccessPolicy, Actor, Capability, GymRepository, Role, User, UserListing, UserRepository,
};
use crate::shared::error::AppError;

/// User service trait for dependency injection
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account. `actor` is the caller, if authenticated.
    async fn register(&self, actor: Option<&Actor>, input: Registration)
        -> Result<User, AppError>;

    /// All users with their gym names (admins and trainers).
    async fn list(&self, actor: &Actor) -> Result<Vec<UserListing>, AppError>;

    /// Create the configured admin account unless its email is already taken.
    async fn ensure_admin(&self, settings: &BootstrapSettings) -> Result<Option<User>, AppError>;
}

/// Registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub gym_id: Option<i64>,
}

/// UserService implementation
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    gyms: Arc<dyn GymRepository>,
}

impl UserServiceImpl {
    pub fn new(users: Arc<dyn UserRepository>, gyms: Arc<dyn GymRepository>) -> Self {
        Self { users, gyms }
    }

    async fn insert(&self, input: Registration, role: Role) -> Result<User, AppError> {
        if self.users.email_exists(&input.email).await? {
            return Err(AppError::Conflict("Email is already registered".into()));
        }

        if let Some(gym_id) = input.gym_id {
            if !self.gyms.exists(gym_id).await? {
                return Err(AppError::NotFound(format!("Gym with id {} not found", gym_id)));
            }
        }

        let user = User {
            id: 0,
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            bio: input.bio,
            role,
            gym_id: input.gym_id,
            created_at: Utc::now(),
        };

        self.users.create(&user).await
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn register(
        &self,
        actor: Option<&Actor>,
        input: Registration,
    ) -> Result<User, AppError> {
        let role = match input.role.as_deref() {
            None | Some("") => Role::default(),
            Some(raw) => Role::parse(raw)
                .ok_or_else(|| AppError::validation(format!("Unknown role: {}", raw)))?,
        };

        AccessPolicy::check_optional(actor, Capability::AssignRole(role)).require()?;

        let user = self.insert(input, role).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    async fn list(&self, actor: &Actor) -> Result<Vec<UserListing>, AppError> {
        AccessPolicy::check(actor, Capability::ListUsers).require()?;
        self.users.list_with_gym().await
    }

    async fn ensure_admin(&self, settings: &BootstrapSettings) -> Result<Option<User>, AppError> {
        let (Some(email), Some(password)) = (&settings.admin_email, &settings.admin_password)
        else {
            return Ok(None);
        };

        if self.users.email_exists(email).await? {
            tracing::debug!(email = %email, "Admin account already present");
            return Ok(None);
        }

        let registration = Registration {
            username: settings
                .admin_username
                .clone()
                .unwrap_or_else(|| "admin".to_string()),
            email: email.clone(),
            password: password.clone(),
            bio: None,
            role: None,
            gym_id: None,
        };

        let admin = self.insert(registration, Role::Admin).await?;
        tracing::info!(user_id = admin.id, "Bootstrap admin created");
        Ok(Some(admin))
    }
}
