//! # Value Objects
//!
//! Small immutable types shared across entities.

mod appointment_status;
mod role;

pub use appointment_status::AppointmentStatus;
pub use role::Role;
