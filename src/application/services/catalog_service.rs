//! Catalog Service
//!
//! CRUD for the services (classes, personal training, ...) each gym offers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    AccessPolicy, Actor, Capability, GymRepository, OfferingListing, OfferingScope,
    ServiceOffering, ServiceOfferingRepository,
};
use crate::shared::error::AppError;

/// Writable service fields
#[derive(Debug, Clone)]
pub struct OfferingInput {
    pub name: String,
    pub description: Option<String>,
    pub service_type: Option<String>,
    pub price: Decimal,
    pub duration_minutes: i32,
    pub gym_id: i64,
    pub is_active: bool,
}

/// Catalog service trait for dependency injection
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Everything for admins; active services of active gyms otherwise.
    async fn list(&self, actor: &Actor) -> Result<Vec<OfferingListing>, AppError>;

    async fn get(&self, actor: &Actor, id: i64) -> Result<OfferingListing, AppError>;

    /// Active services of one gym.
    async fn list_by_gym(&self, gym_id: i64) -> Result<Vec<OfferingListing>, AppError>;

    async fn create(&self, actor: &Actor, input: OfferingInput)
        -> Result<ServiceOffering, AppError>;

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        input: OfferingInput,
    ) -> Result<ServiceOffering, AppError>;

    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError>;
}

/// CatalogService implementation
pub struct CatalogServiceImpl {
    offerings: Arc<dyn ServiceOfferingRepository>,
    gyms: Arc<dyn GymRepository>,
}

impl CatalogServiceImpl {
    pub fn new(
        offerings: Arc<dyn ServiceOfferingRepository>,
        gyms: Arc<dyn GymRepository>,
    ) -> Self {
        Self { offerings, gyms }
    }

    async fn ensure_gym(&self, gym_id: i64) -> Result<(), AppError> {
        if !self.gyms.exists(gym_id).await? {
            return Err(AppError::NotFound(format!("Gym with id {} not found", gym_id)));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Service with id {} not found", id))
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list(&self, actor: &Actor) -> Result<Vec<OfferingListing>, AppError> {
        let scope = if AccessPolicy::sees_inactive(Some(actor)) {
            OfferingScope::All
        } else {
            OfferingScope::Visible
        };
        self.offerings.list(scope).await
    }

    async fn get(&self, actor: &Actor, id: i64) -> Result<OfferingListing, AppError> {
        let listing = self
            .offerings
            .find_listing(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !listing.is_visible_to(AccessPolicy::sees_inactive(Some(actor))) {
            return Err(not_found(id));
        }
        Ok(listing)
    }

    async fn list_by_gym(&self, gym_id: i64) -> Result<Vec<OfferingListing>, AppError> {
        self.offerings.list(OfferingScope::ActiveInGym(gym_id)).await
    }

    async fn create(
        &self,
        actor: &Actor,
        input: OfferingInput,
    ) -> Result<ServiceOffering, AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;
        self.ensure_gym(input.gym_id).await?;

        let offering = ServiceOffering {
            name: input.name,
            description: input.description,
            service_type: input.service_type,
            price: input.price,
            duration_minutes: input.duration_minutes,
            gym_id: input.gym_id,
            is_active: input.is_active,
            created_at: Utc::now(),
            ..ServiceOffering::default()
        };
        let created = self.offerings.create(&offering).await?;

        tracing::info!(service_id = created.id, gym_id = created.gym_id, "Service created");
        Ok(created)
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i64,
        input: OfferingInput,
    ) -> Result<ServiceOffering, AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;

        let mut offering = self
            .offerings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.ensure_gym(input.gym_id).await?;

        offering.name = input.name;
        offering.description = input.description;
        offering.service_type = input.service_type;
        offering.price = input.price;
        offering.duration_minutes = input.duration_minutes;
        offering.gym_id = input.gym_id;
        offering.is_active = input.is_active;
        offering.updated_at = Some(Utc::now());

        let updated = self.offerings.update(&offering).await?;
        tracing::info!(service_id = id, "Service updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError> {
        AccessPolicy::check(actor, Capability::ManageCatalog).require()?;

        self.offerings.delete(id).await?;
        tracing::info!(service_id = id, "Service deleted");
        Ok(())
    }
}
