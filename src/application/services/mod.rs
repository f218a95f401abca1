//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Login, password hashing, JWT access tokens
//! - **UserService**: Registration, user listing, bootstrap admin
//! - **AppointmentService**: Appointment admission and status transitions
//! - **GymService**: Gym management
//! - **CatalogService**: Services offered by gyms
//! - **PostService**: Posts with cache-aside reads
//! - **CacheProxyService**: Admin key/value access
//! - **RecommendationService**: Fitness recommendations from a text generator

pub mod appointment_service;
pub mod auth_service;
pub mod cache_proxy_service;
pub mod catalog_service;
pub mod gym_service;
pub mod post_service;
pub mod recommendation_service;
pub mod user_service;

pub use appointment_service::{
    AppointmentError, AppointmentService, AppointmentServiceImpl, NewAppointment,
};
pub use auth_service::{
    hash_password, verify_password, AuthError, AuthService, AuthServiceImpl, Claims,
};
pub use cache_proxy_service::{CacheProxyService, CacheProxyServiceImpl};
pub use catalog_service::{CatalogService, CatalogServiceImpl, OfferingInput};
pub use gym_service::{GymInput, GymService, GymServiceImpl};
pub use post_service::{PostInput, PostService, PostServiceImpl};
pub use recommendation_service::{
    FitnessProfile, Generation, RecommendationService, RecommendationServiceImpl, TextGenerator,
};
pub use user_service::{Registration, UserService, UserServiceImpl};
