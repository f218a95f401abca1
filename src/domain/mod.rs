//! # Domain Layer
//!
//! The domain layer contains the core business rules of the gym server.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Appointment, Gym, ServiceOffering, User, Post)
//! - **value_objects**: Small value types (Role, AppointmentStatus)
//! - **services**: Access policy and admission rules
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::{AccessPolicy, Actor, Capability};
pub use value_objects::*;
