//! Appointment entity and repository trait.
//!
//! Maps to the `appointments` table. An appointment books a member with a
//! trainer for one service at one gym, at an exact date and time-of-day.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AppointmentStatus;
use crate::shared::error::AppError;

/// A booked appointment.
///
/// Maps to the `appointments` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - date: DATE NOT NULL
/// - time: TIME NOT NULL
/// - member_id / trainer_id: BIGINT NOT NULL REFERENCES users(id)
/// - service_id: BIGINT NOT NULL REFERENCES services(id)
/// - gym_id: BIGINT NOT NULL REFERENCES gyms(id)
/// - status: VARCHAR(16) NOT NULL
/// - price: NUMERIC(10, 2) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL
/// - canceled_by: VARCHAR(64) NULL
/// - canceled_at: TIMESTAMPTZ NULL
///
/// Unique on `(trainer_id, date, time)` and on `(member_id, date, time)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i64,
    pub trainer_id: i64,
    pub service_id: i64,
    pub gym_id: i64,
    pub status: AppointmentStatus,

    /// Price of the service at booking time
    pub price: Decimal,

    pub created_at: DateTime<Utc>,

    /// Username of whoever canceled the appointment
    pub canceled_by: Option<String>,

    pub canceled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Set the decision of the booked member.
    pub fn decide(&mut self, status: AppointmentStatus) {
        self.status = status;
    }

    /// Mark as canceled by `actor`.
    pub fn cancel(&mut self, actor: &str, at: DateTime<Utc>) {
        self.status = AppointmentStatus::Canceled;
        self.canceled_by = Some(actor.to_string());
        self.canceled_at = Some(at);
    }
}

/// An appointment with the names of everything it references resolved.
#[derive(Debug, Clone)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub member_name: String,
    pub trainer_name: String,
    pub service_name: String,
    pub gym_name: String,
}

/// Which appointments a listing query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentScope {
    All,
    Trainer(i64),
    Member(i64),
}

impl AppointmentScope {
    pub fn includes(&self, appointment: &Appointment) -> bool {
        match self {
            Self::All => true,
            Self::Trainer(id) => appointment.trainer_id == *id,
            Self::Member(id) => appointment.member_id == *id,
        }
    }
}

/// Repository trait for Appointment data access operations.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find an appointment by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError>;

    /// Find an appointment by ID with resolved names.
    async fn find_detail(&self, id: i64) -> Result<Option<AppointmentDetail>, AppError>;

    /// List appointments with resolved names, newest slot first.
    async fn list_details(
        &self,
        scope: AppointmentScope,
    ) -> Result<Vec<AppointmentDetail>, AppError>;

    /// Whether the trainer already has an appointment at this exact slot.
    async fn trainer_slot_taken(
        &self,
        trainer_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError>;

    /// Whether the member already has an appointment at this exact slot.
    async fn member_slot_taken(
        &self,
        member_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool, AppError>;

    /// Insert an appointment; the `id` field is ignored.
    ///
    /// A slot collision surfaces as `AppError::Conflict`.
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;

    /// Persist status and cancellation fields.
    async fn update_status(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
}
