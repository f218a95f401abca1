//! Service Offering Repository Implementation
//!
//! PostgreSQL implementation of the ServiceOfferingRepository trait
//! (`services` table).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::domain::{OfferingListing, OfferingScope, ServiceOffering, ServiceOfferingRepository};
use crate::infrastructure::database::not_found_on_foreign_key;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct OfferingRow {
    id: i64,
    name: String,
    description: Option<String>,
    service_type: Option<String>,
    price: Decimal,
    duration_minutes: i32,
    gym_id: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl OfferingRow {
    fn into_offering(self) -> ServiceOffering {
        ServiceOffering {
            id: self.id,
            name: self.name,
            description: self.description,
            service_type: self.service_type,
            price: self.price,
            duration_minutes: self.duration_minutes,
            gym_id: self.gym_id,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    #[sqlx(flatten)]
    offering: OfferingRow,
    gym_name: String,
    gym_is_active: bool,
}

impl ListingRow {
    fn into_listing(self) -> OfferingListing {
        OfferingListing {
            offering: self.offering.into_offering(),
            gym_name: self.gym_name,
            gym_is_active: self.gym_is_active,
        }
    }
}

const LISTING_SELECT: &str = r#"
    SELECT s.id, s.name, s.description, s.service_type, s.price, s.duration_minutes,
           s.gym_id, s.is_active, s.created_at, s.updated_at,
           g.name AS gym_name, g.is_active AS gym_is_active
    FROM services s
    JOIN gyms g ON g.id = s.gym_id
"#;

const RETURNING: &str = "RETURNING id, name, description, service_type, price, duration_minutes, \
                         gym_id, is_active, created_at, updated_at";

/// PostgreSQL service offering repository implementation.
#[derive(Clone)]
pub struct PgServiceOfferingRepository {
    pool: PgPool,
}

impl PgServiceOfferingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceOfferingRepository for PgServiceOfferingRepository {
    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceOffering>, AppError> {
        let row = sqlx::query_as::<_, OfferingRow>(
            r#"
            SELECT id, name, description, service_type, price, duration_minutes,
                   gym_id, is_active, created_at, updated_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_offering()))
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_listing(&self, id: i64) -> Result<Option<OfferingListing>, AppError> {
        let row = sqlx::query_as::<_, ListingRow>(&format!("{LISTING_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_listing()))
    }

    #[instrument(skip(self), level = "debug")]
    async fn list(&self, scope: OfferingScope) -> Result<Vec<OfferingListing>, AppError> {
        let query = match scope {
            OfferingScope::All => {
                sqlx::query_as::<_, ListingRow>(&format!("{LISTING_SELECT} ORDER BY s.id"))
                    .fetch_all(&self.pool)
                    .await?
            }
            OfferingScope::Visible => {
                sqlx::query_as::<_, ListingRow>(&format!(
                    "{LISTING_SELECT} WHERE s.is_active AND g.is_active ORDER BY s.id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            OfferingScope::ActiveInGym(gym_id) => {
                sqlx::query_as::<_, ListingRow>(&format!(
                    "{LISTING_SELECT} WHERE s.gym_id = $1 AND s.is_active ORDER BY s.id"
                ))
                .bind(gym_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(query.into_iter().map(|r| r.into_listing()).collect())
    }

    async fn create(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError> {
        let row = sqlx::query_as::<_, OfferingRow>(&format!(
            r#"
            INSERT INTO services
                (name, description, service_type, price, duration_minutes, gym_id, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            {RETURNING}
            "#
        ))
        .bind(&offering.name)
        .bind(&offering.description)
        .bind(&offering.service_type)
        .bind(offering.price)
        .bind(offering.duration_minutes)
        .bind(offering.gym_id)
        .bind(offering.is_active)
        .bind(offering.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(not_found_on_foreign_key("Gym not found"))?;

        Ok(row.into_offering())
    }

    async fn update(&self, offering: &ServiceOffering) -> Result<ServiceOffering, AppError> {
        let row = sqlx::query_as::<_, OfferingRow>(&format!(
            r#"
            UPDATE services
            SET name = $2,
                description = $3,
                service_type = $4,
                price = $5,
                duration_minutes = $6,
                gym_id = $7,
                is_active = $8,
                updated_at = NOW()
            WHERE id = $1
            {RETURNING}
            "#
        ))
        .bind(offering.id)
        .bind(&offering.name)
        .bind(&offering.description)
        .bind(&offering.service_type)
        .bind(offering.price)
        .bind(offering.duration_minutes)
        .bind(offering.gym_id)
        .bind(offering.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(not_found_on_foreign_key("Gym not found"))?
        .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", offering.id)))?;

        Ok(row.into_offering())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service with id {} not found", id)));
        }

        Ok(())
    }
}
