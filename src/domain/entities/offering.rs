//! Service offering entity and repository trait.
//!
//! A service offering is something a gym sells (personal training, yoga
//! class, ...). Maps to the `services` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A service offered by a gym.
///
/// Maps to the `services` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - description: VARCHAR(500) NULL
/// - service_type: VARCHAR(64) NULL
/// - price: NUMERIC(10, 2) NOT NULL
/// - duration_minutes: INTEGER NOT NULL
/// - gym_id: BIGINT NOT NULL REFERENCES gyms(id) ON DELETE CASCADE
/// - is_active: BOOLEAN NOT NULL DEFAULT TRUE
/// - created_at / updated_at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub service_type: Option<String>,

    /// Current list price; appointments keep the price they were booked at
    pub price: Decimal,

    pub duration_minutes: i32,
    pub gym_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for ServiceOffering {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            description: None,
            service_type: None,
            price: Decimal::ZERO,
            duration_minutes: 60,
            gym_id: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// A service together with the name of the gym that offers it.
#[derive(Debug, Clone)]
pub struct OfferingListing {
    pub offering: ServiceOffering,
    pub gym_name: String,
    pub gym_is_active: bool,
}

impl OfferingListing {
    /// Visible to regular callers only when both the service and its gym are active.
    pub fn is_visible_to(&self, sees_inactive: bool) -> bool {
        sees_inactive || (self.offering.is_active && self.gym_is_active)
    }
}

/// Which services a listing query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferingScope {
    /// Every service
    All,
    /// Active services of active gyms
    Visible,
    /// Active services of one gym
    ActiveInGym(i64),
}

/// Repository trait for service offerings.
#[async_trait]
pub trait ServiceOfferingRepository: Send + Sync {
    /// Find a service by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError>;

    /// Find a service by ID together with its gym.
    async fn find_listing(&self, id: i64) -> Result<Option<OfferingListing>, AppError>;

    /// List services with their gym names.
    async fn list(&self, scope: OfferingScope) -> Result<Vec<OfferingListing>, AppError>;

    /// Insert a service; the `id` field is ignored.
    async fn create(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError>;

    /// Update an existing service.
    async fn update(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError>;

    /// Hard-delete a service.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
