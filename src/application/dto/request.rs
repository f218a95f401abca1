//! Request DTOs
//!
//! Data structures for API request bodies.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::PostVisibility;

/// Login request; `username` may also hold an email address
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub bio: Option<String>,

    /// "Admin", "Trainer" or "Member"; defaults to Member
    pub role: Option<String>,

    pub gym_id: Option<i64>,
}

/// Create appointment request.
///
/// `status` and `price` are accepted for compatibility but never trusted:
/// new appointments are always pending and priced from the service.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i64,
    pub trainer_id: i64,
    pub service_id: i64,
    pub gym_id: i64,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Create or replace a gym
#[derive(Debug, Deserialize, Validate)]
pub struct GymRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 200, message = "Address must be at most 200 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 32, message = "Phone number must be at most 32 characters"))]
    pub phone_number: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create or replace a service offering
#[derive(Debug, Deserialize, Validate)]
pub struct ServiceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 64, message = "Service type must be at most 64 characters"))]
    pub service_type: Option<String>,

    #[validate(custom(function = "non_negative_price"))]
    pub price: Decimal,

    #[validate(range(min = 1, message = "Duration must be at least one minute"))]
    pub duration_minutes: i32,

    pub gym_id: i64,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create or replace a post
#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub visibility: PostVisibility,
}

/// One year, in minutes.
pub const MAX_EXPIRATION_MINUTES: u64 = 525_600;

/// Store a value through the cache proxy
#[derive(Debug, Deserialize, Validate)]
pub struct CacheSetRequest {
    #[validate(length(min = 1, max = 200, message = "Key must be 1-200 characters"))]
    pub key: String,

    pub value: String,

    #[validate(range(
        min = 1,
        max = MAX_EXPIRATION_MINUTES,
        message = "Expiration must be between one minute and one year"
    ))]
    pub expiration_minutes: Option<u64>,
}

/// Inputs for a fitness recommendation
#[derive(Debug, Deserialize, Validate)]
pub struct FitnessRequest {
    #[validate(length(min = 1, message = "Height is required"))]
    pub height: String,

    #[validate(length(min = 1, message = "Weight is required"))]
    pub weight: String,

    #[validate(length(min = 1, message = "Body type is required"))]
    pub body_type: String,

    #[validate(length(min = 1, message = "Goal is required"))]
    pub goal: String,
}

fn default_true() -> bool {
    true
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    Ok(())
}
