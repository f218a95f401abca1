//! Appointment Repository Implementation
//!
//! PostgreSQL implementation of the AppointmentRepository trait.
//! Slot uniqueness is enforced by the `idx_appointments_*_slot` indexes;
//! a violation on insert is reported as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::domain::{
    Appointment, AppointmentDetail, AppointmentRepository, AppointmentScope, AppointmentStatus,
};
use crate::infrastructure::database::reject_write;
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: i64,
    date: NaiveDate,
    time: NaiveTime,
    member_id: i64,
    trainer_id: i64,
    service_id: i64,
    gym_id: i64,
    status: String,
    price: Decimal,
    created_at: DateTime<Utc>,
    canceled_by: Option<String>,
    canceled_at: Option<DateTime<Utc>>,
}

impl AppointmentRow {
    fn into_appointment(self) -> Appointment {
        Appointment {
            id: self.id,
            date: self.date,
            time: self.time,
            member_id: self.member_id,
            trainer_id: self.trainer_id,
            service_id: self.service_id,
            gym_id: self.gym_id,
            status: AppointmentStatus::from_str(&self.status),
            price: self.price,
            created_at: self.created_at,
            canceled_by: self.canceled_by,
            canceled_at: self.canceled_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DetailRow {
    #[sqlx(flatten)]
    appointment: AppointmentRow,
    member_name: String,
    trainer_name: String,
    service_name: String,
    gym_name: String,
}

impl DetailRow {
    fn into_detail(self) -> AppointmentDetail {
        AppointmentDetail {
            appointment: self.appointment.into_appointment(),
            member_name: self.member_name,
            trainer_name: self.trainer_name,
            service_name: self.service_name,
            gym_name: self.gym_name,
        }
    }
}

const COLUMNS: &str = "id, date, time, member_id, trainer_id, service_id, gym_id, status, \
                       price, created_at, canceled_by, canceled_at";

const DETAIL_SELECT: &str = r#"
    SELECT a.id, a.date, a.time, a.member_id, a.trainer_id, a.service_id, a.gym_id,
           a.status, a.price, a.created_at, a.canceled_by, a.canceled_at,
           m.username AS member_name, t.username AS trainer_name,
           s.name AS service_name, g.name AS gym_name
    FROM appointments a
    JOIN users m ON m.id = a.member_id
    JOIN users t ON t.id = a.trainer_id
    JOIN services s ON s.id = a.service_id
    JOIN gyms g ON g.id = a.gym_id
"#;

/// PostgreSQL appointment repository implementation.
#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_appointment()))
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_detail(&self, id: i64) -> Result<Option<AppointmentDetail>, AppError> {
        let row = sqlx::query_as::<_, DetailRow>(&format!("{DETAIL_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_detail()))
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_details(
        &self,
        scope: AppointmentScope,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let (filter, user_id) = match scope {
            AppointmentScope::All => ("TRUE", None),
            AppointmentScope::Trainer(id) => ("a.trainer_id = $1", Some(id)),
            AppointmentScope::Member(id) => ("a.member_id = $1", Some(id)),
        };
        let sql = format!("{DETAIL_SELECT} WHERE {filter} ORDER BY a.date DESC, a.time DESC");

        let mut query = sqlx::query_as::<_, DetailRow>(&sql);
        if let Some(id) = user_id {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|r| r.into_detail()).collect())
    }

    async fn trainer_slot_taken(
        &self,
        trainer_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE trainer_id = $1 AND date = $2 AND time = $3
            )
            "#,
        )
        .bind(trainer_id)
        .bind(date)
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    async fn member_slot_taken(
        &self,
        member_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM appointments
                WHERE member_id = $1 AND date = $2 AND time = $3
            )
            "#,
        )
        .bind(member_id)
        .bind(date)
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(self, appointment), fields(trainer_id = appointment.trainer_id))]
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            r#"
            INSERT INTO appointments
                (date, time, member_id, trainer_id, service_id, gym_id, status, price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(appointment.date)
        .bind(appointment.time)
        .bind(appointment.member_id)
        .bind(appointment.trainer_id)
        .bind(appointment.service_id)
        .bind(appointment.gym_id)
        .bind(appointment.status.as_str())
        .bind(appointment.price)
        .bind(appointment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(reject_write(
            "An appointment already exists at this date and time",
            "Referenced member, trainer, service or gym not found",
        ))?;

        Ok(row.into_appointment())
    }

    async fn update_status(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            r#"
            UPDATE appointments
            SET status = $2,
                canceled_by = $3,
                canceled_at = $4
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(appointment.id)
        .bind(appointment.status.as_str())
        .bind(&appointment.canceled_by)
        .bind(appointment.canceled_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Appointment with id {} not found", appointment.id))
        })?;

        Ok(row.into_appointment())
    }
}
