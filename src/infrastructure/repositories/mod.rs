//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits, plus the
//! [`Repositories`] bundle the application state is built from.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - Accounts and roles
//! - **GymRepository** - Gym locations
//! - **ServiceOfferingRepository** - Services sold by gyms (`services` table)
//! - **AppointmentRepository** - Bookings and their status transitions
//! - **PostRepository** - Posts

pub mod appointment_repository;
pub mod gym_repository;
pub mod offering_repository;
pub mod post_repository;
pub mod user_repository;

pub use appointment_repository::PgAppointmentRepository;
pub use gym_repository::PgGymRepository;
pub use offering_repository::PgServiceOfferingRepository;
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{
    AppointmentRepository, GymRepository, PostRepository, ServiceOfferingRepository,
    UserRepository,
};

/// Every repository the application needs, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub gyms: Arc<dyn GymRepository>,
    pub offerings: Arc<dyn ServiceOfferingRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            gyms: Arc::new(PgGymRepository::new(pool.clone())),
            offerings: Arc::new(PgServiceOfferingRepository::new(pool.clone())),
            appointments: Arc::new(PgAppointmentRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool)),
        }
    }
}
