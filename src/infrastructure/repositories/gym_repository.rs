//! Gym Repository Implementation
//!
//! PostgreSQL implementation of the GymRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::domain::{Gym, GymRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct GymRow {
    id: i64,
    name: String,
    address: Option<String>,
    phone_number: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl GymRow {
    fn into_gym(self) -> Gym {
        Gym {
            id: self.id,
            name: self.name,
            address: self.address,
            phone_number: self.phone_number,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL gym repository implementation.
#[derive(Clone)]
pub struct PgGymRepository {
    pool: PgPool,
}

impl PgGymRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GymRepository for PgGymRepository {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self, include_inactive: bool) -> Result<Vec<Gym>, AppError> {
        let rows = sqlx::query_as::<_, GymRow>(
            r#"
            SELECT id, name, address, phone_number, is_active, created_at, updated_at
            FROM gyms
            WHERE $1 OR is_active
            ORDER BY id
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_gym()).collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: i64) -> Result<Option<Gym>, AppError> {
        let row = sqlx::query_as::<_, GymRow>(
            r#"
            SELECT id, name, address, phone_number, is_active, created_at, updated_at
            FROM gyms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_gym()))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let result =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM gyms WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result)
    }

    async fn create(&self, gym: &Gym) -> Result<Gym, AppError> {
        let row = sqlx::query_as::<_, GymRow>(
            r#"
            INSERT INTO gyms (name, address, phone_number, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, address, phone_number, is_active, created_at, updated_at
            "#,
        )
        .bind(&gym.name)
        .bind(&gym.address)
        .bind(&gym.phone_number)
        .bind(gym.is_active)
        .bind(gym.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_gym())
    }

    async fn update(&self, gym: &Gym) -> Result<Gym, AppError> {
        let row = sqlx::query_as::<_, GymRow>(
            r#"
            UPDATE gyms
            SET name = $2,
                address = $3,
                phone_number = $4,
                is_active = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, phone_number, is_active, created_at, updated_at
            "#,
        )
        .bind(gym.id)
        .bind(&gym.name)
        .bind(&gym.address)
        .bind(&gym.phone_number)
        .bind(gym.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Gym with id {} not found", gym.id)))?;

        Ok(row.into_gym())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gyms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Gym with id {} not found", id)));
        }

        Ok(())
    }
}
