//! # Domain Services
//!
//! Business rules that don't belong to a single entity.
//!
//! - **AccessPolicy**: role-based capability checks
//! - **admission**: scheduling rules for new appointments

mod access_policy;
pub mod admission;

pub use access_policy::*;
pub use admission::{check_schedule, ScheduleViolation};
