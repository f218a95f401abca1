//! Gym entity and repository trait.
//!
//! Maps to the `gyms` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A gym location.
///
/// Maps to the `gyms` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - address: VARCHAR(200) NULL
/// - phone_number: VARCHAR(32) NULL
/// - is_active: BOOLEAN NOT NULL DEFAULT TRUE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gym {
    /// Database-assigned ID (0 before insert)
    pub id: i64,

    pub name: String,

    pub address: Option<String>,

    pub phone_number: Option<String>,

    /// Inactive gyms are hidden from everyone but admins
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Gym {
    /// Whether a caller that cannot see inactive records may see this gym.
    pub fn is_visible_to(&self, sees_inactive: bool) -> bool {
        sees_inactive || self.is_active
    }
}

impl Default for Gym {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            address: None,
            phone_number: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Repository trait for Gym data access operations.
#[async_trait]
pub trait GymRepository: Send + Sync {
    /// List gyms, optionally including inactive ones.
    async fn list(&self, include_inactive: bool) -> Result<Vec<Gym>, AppError>;

    /// Find a gym by ID regardless of its active flag.
    async fn find_by_id(&self, id: i64) -> Result<Option<Gym>, AppError>;

    /// Check whether a gym exists.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Insert a gym; the `id` field is ignored.
    async fn create(&self, gym: &Gym) -> Result<Gym, AppError>;

    /// Update an existing gym.
    async fn update(&self, gym: &Gym) -> Result<Gym, AppError>;

    /// Hard-delete a gym (cascades to its services).
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
