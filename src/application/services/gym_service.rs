//! Gym Service
//!
//! Gym CRUD with visibility rules for inactive gyms.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AccessPolicy, Actor, Capability, Gym, GymRepository};
use crate::shared::error::AppError;

/// Writable gym fields
#[derive(Debug, Clone)]
pub struct GymInput {
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
}

/// Gym service trait for dependency injection
#[async_trait]
pub trait GymService: Send + Sync {
    /// All gyms for admins, active gyms for everyone else (including anonymous callers).
    async fn list(&self, actor: Option<&Actor>) -> Result<Vec<Gym>, AppError>;

    async fn get(&self, actor: &Actor, id: i64) -> Result<Gym, AppError>;

    async fn create(&self, actor: &Actor, input: GymInput) -> Result<Gym, AppError>;

    async fn update(&self, actor: &Actor, id: i64, input: GymInput) -> Result<Gym, AppError>;

    /// Hard delete; the gym's services go with it.
    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError>;
}

/// GymService implementation
pub struct GymServiceImpl {
    gyms: Arc<dyn GymRepository>,
}

impl GymServiceImpl {
    pub fn new(gyms: Arc<dyn GymRepository>) -> Self {
        Self { gyms }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Gym with id {} not found", id))
}

#[async_trait]
impl GymService for GymServiceImpl {
    async fn list(&self, actor: Option<&Actor>) -> Result<Vec<Gym>, AppError> {
        self.gyms.list(AccessPolicy::sees_inactive(actor)).await
    }

    async fn get(&self, actor: &Actor, id: i64) -> Result<Gym, AppError> {
        let gym = self.gyms.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        if !gym.is_visible_to(AccessPolicy::sees_inactive(Some(actor))) {
            return Err(not_found(id));
        }
        Ok(gym)
    }

    async fn create(&self, actor: &Actor, input: GymInput) -> Result<Gym, AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;

        let gym = Gym {
            name: input.name,
            address: input.address,
            phone_number: input.phone_number,
            is_active: input.is_active,
            created_at: Utc::now(),
            ..Gym::default()
        };
        let created = self.gyms.create(&gym).await?;

        tracing::info!(gym_id = created.id, "Gym created");
        Ok(created)
    }

    async fn update(&self, actor: &Actor, id: i64, input: GymInput) -> Result<Gym, AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;

        let mut gym = self.gyms.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        gym.name = input.name;
        gym.address = input.address;
        gym.phone_number = input.phone_number;
        gym.is_active = input.is_active;
        gym.updated_at = Some(Utc::now());

        let updated = self.gyms.update(&gym).await?;
        tracing::info!(gym_id = id, "Gym updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;

        self.gyms.delete(id).await?;
        tracing::info!(gym_id = id, "Gym deleted");
        Ok(())
    }
}
