//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Role;
use crate::shared::error::AppError;

/// A user account.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(64) NOT NULL (not unique)
/// - email: VARCHAR(255) NOT NULL UNIQUE (case-insensitive)
/// - password_hash: VARCHAR(255) NOT NULL
/// - bio: TEXT NULL
/// - role: VARCHAR(16) NOT NULL
/// - gym_id: BIGINT NULL REFERENCES gyms(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub username: String,

    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub bio: Option<String>,

    pub role: Role,

    /// Home gym, if any
    pub gym_id: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            bio: None,
            role: Role::default(),
            gym_id: None,
            created_at: Utc::now(),
        }
    }
}

/// A user together with the name of their gym.
#[derive(Debug, Clone)]
pub struct UserListing {
    pub user: User,
    pub gym_name: Option<String>,
}

/// Repository trait for User data access operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by email address (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Find the first user with this username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Insert a user; the `id` field is ignored.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// List all users with their gym names.
    async fn list_with_gym(&self) -> Result<Vec<UserListing>, AppError>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}
