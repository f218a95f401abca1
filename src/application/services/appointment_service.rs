//! Appointment Service
//!
//! Admission of new appointments and their status transitions.
//!
//! Admission runs four gates in order and stops at the first failure:
//! role, schedule, slot conflicts, then the referenced service, member,
//! trainer and gym. Only then is the appointment written, always as
//! `Pending` and priced from the service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};

use crate::domain::services::{check_schedule, Access, ScheduleViolation};
use crate::domain::{
    AccessPolicy, Actor, Appointment, AppointmentDetail, AppointmentRepository, AppointmentScope,
    AppointmentStatus, Capability, GymRepository, Role, ServiceOfferingRepository, UserRepository,
};
use crate::shared::error::AppError;

/// Appointment service trait for dependency injection
#[async_trait]
pub trait AppointmentService: Send + Sync {
    /// Admit and persist a new appointment.
    async fn create(
        &self,
        actor: &Actor,
        request: NewAppointment,
    ) -> Result<AppointmentDetail, AppointmentError>;

    /// Appointments visible to the caller.
    async fn list(&self, actor: &Actor) -> Result<Vec<AppointmentDetail>, AppointmentError>;

    /// A single appointment visible to the caller.
    async fn get(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError>;

    /// Member accepts a pending appointment.
    async fn approve(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError>;

    /// Member declines a pending appointment.
    async fn reject(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError>;

    /// Trainer or admin cancels an appointment.
    async fn cancel(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError>;
}

/// Booking request after deserialization
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i64,
    pub trainer_id: i64,
    pub service_id: i64,
    pub gym_id: i64,
}

/// Appointment errors
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("{0}")]
    Forbidden(&'static str),

    #[error(transparent)]
    Schedule(#[from] ScheduleViolation),

    #[error("The trainer already has an appointment at this date and time")]
    TrainerBusy,

    #[error("The member already has an appointment at this date and time")]
    MemberBusy,

    #[error("Selected service not found")]
    ServiceNotFound,

    #[error("Selected member not found")]
    MemberNotFound,

    #[error("Selected trainer not found")]
    TrainerNotFound,

    #[error("Selected gym not found")]
    GymNotFound,

    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment is already {0}")]
    AlreadyDecided(AppointmentStatus),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Forbidden(reason) => AppError::Forbidden(reason.to_string()),
            AppointmentError::Schedule(v) => AppError::BadRequest(v.to_string()),
            AppointmentError::TrainerBusy
            | AppointmentError::MemberBusy
            | AppointmentError::AlreadyDecided(_) => AppError::Conflict(err.to_string()),
            AppointmentError::ServiceNotFound
            | AppointmentError::MemberNotFound
            | AppointmentError::TrainerNotFound
            | AppointmentError::GymNotFound
            | AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::Repository(e) => e,
        }
    }
}

fn granted(access: Access) -> Result<(), AppointmentError> {
    match access {
        Access::Granted => Ok(()),
        Access::Denied(reason) => Err(AppointmentError::Forbidden(reason)),
    }
}

/// AppointmentService implementation
pub struct AppointmentServiceImpl {
    appointments: Arc<dyn AppointmentRepository>,
    offerings: Arc<dyn ServiceOfferingRepository>,
    users: Arc<dyn UserRepository>,
    gyms: Arc<dyn GymRepository>,
}

impl AppointmentServiceImpl {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        offerings: Arc<dyn ServiceOfferingRepository>,
        users: Arc<dyn UserRepository>,
        gyms: Arc<dyn GymRepository>,
    ) -> Self {
        Self {
            appointments,
            offerings,
            users,
            gyms,
        }
    }

    async fn load(&self, id: i64) -> Result<Appointment, AppointmentError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    async fn detail(&self, id: i64) -> Result<AppointmentDetail, AppointmentError> {
        self.appointments
            .find_detail(id)
            .await?
            .ok_or(AppointmentError::NotFound)
    }

    async fn decide(
        &self,
        actor: &Actor,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<AppointmentDetail, AppointmentError> {
        let mut appointment = self.load(id).await?;

        granted(AccessPolicy::check(
            actor,
            Capability::DecideAppointment {
                member_id: appointment.member_id,
            },
        ))?;

        if !appointment.status.awaits_decision() {
            return Err(AppointmentError::AlreadyDecided(appointment.status));
        }

        appointment.decide(status);
        self.appointments.update_status(&appointment).await?;

        tracing::info!(
            appointment_id = id,
            user_id = actor.user_id,
            status = %status,
            "Appointment decided"
        );

        self.detail(id).await
    }
}

#[async_trait]
impl AppointmentService for AppointmentServiceImpl {
    async fn create(
        &self,
        actor: &Actor,
        request: NewAppointment,
    ) -> Result<AppointmentDetail, AppointmentError> {
        granted(AccessPolicy::check(
            actor,
            Capability::CreateAppointment {
                trainer_id: request.trainer_id,
            },
        ))?;

        check_schedule(request.date, request.time, Utc::now())?;

        if self
            .appointments
            .trainer_slot_taken(request.trainer_id, request.date, request.time)
            .await?
        {
            return Err(AppointmentError::TrainerBusy);
        }
        if self
            .appointments
            .member_slot_taken(request.member_id, request.date, request.time)
            .await?
        {
            return Err(AppointmentError::MemberBusy);
        }

        let offering = self
            .offerings
            .find_by_id(request.service_id)
            .await?
            .ok_or(AppointmentError::ServiceNotFound)?;

        if self.users.find_by_id(request.member_id).await?.is_none() {
            return Err(AppointmentError::MemberNotFound);
        }
        if self.users.find_by_id(request.trainer_id).await?.is_none() {
            return Err(AppointmentError::TrainerNotFound);
        }
        if !self.gyms.exists(request.gym_id).await? {
            return Err(AppointmentError::GymNotFound);
        }

        let appointment = Appointment {
            id: 0,
            date: request.date,
            time: request.time,
            member_id: request.member_id,
            trainer_id: request.trainer_id,
            service_id: request.service_id,
            gym_id: request.gym_id,
            status: AppointmentStatus::Pending,
            price: offering.price,
            created_at: Utc::now(),
            canceled_by: None,
            canceled_at: None,
        };

        let created = self.appointments.create(&appointment).await?;

        tracing::info!(
            appointment_id = created.id,
            trainer_id = created.trainer_id,
            member_id = created.member_id,
            date = %created.date,
            time = %created.time,
            "Appointment created"
        );

        self.detail(created.id).await
    }

    async fn list(&self, actor: &Actor) -> Result<Vec<AppointmentDetail>, AppointmentError> {
        let scope = match actor.role {
            Role::Admin => AppointmentScope::All,
            Role::Trainer => AppointmentScope::Trainer(actor.user_id),
            Role::Member => AppointmentScope::Member(actor.user_id),
        };

        Ok(self.appointments.list_details(scope).await?)
    }

    async fn get(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError> {
        let detail = self.detail(id).await?;
        let capability = Capability::ViewAppointment {
            member_id: detail.appointment.member_id,
            trainer_id: detail.appointment.trainer_id,
        };

        // Someone else's appointment is reported as missing.
        if !AccessPolicy::check(actor, capability).is_granted() {
            return Err(AppointmentError::NotFound);
        }
        Ok(detail)
    }

    async fn approve(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError> {
        self.decide(actor, id, AppointmentStatus::Approved).await
    }

    async fn reject(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError> {
        self.decide(actor, id, AppointmentStatus::Rejected).await
    }

    async fn cancel(&self, actor: &Actor, id: i64) -> Result<AppointmentDetail, AppointmentError> {
        let mut appointment = self.load(id).await?;

        granted(AccessPolicy::check(
            actor,
            Capability::CancelAppointment {
                trainer_id: appointment.trainer_id,
            },
        ))?;

        appointment.cancel(&actor.username, Utc::now());
        self.appointments.update_status(&appointment).await?;

        tracing::info!(appointment_id = id, user_id = actor.user_id, "Appointment canceled");

        self.detail(id).await
    }
}
