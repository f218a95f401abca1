//! # Gym Server Library
//!
//! REST API for running a chain of gyms:
//! - Appointment booking with role, schedule and double-booking checks
//! - Gym, service and user management with role-based access
//! - Posts served through a Redis cache-aside read path
//! - An admin cache proxy and a Gemini-backed fitness recommendation endpoint
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, repository traits, access policy
//! - **Application Layer**: Business services and DTOs
//! - **Infrastructure Layer**: PostgreSQL, Redis and Gemini implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! gym_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, cache and AI client implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
