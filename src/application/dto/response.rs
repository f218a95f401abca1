//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AppointmentDetail, AppointmentStatus, Gym, OfferingListing, Post, PostVisibility, Role,
    ServiceOffering, User, UserListing,
};

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User response (never carries the password hash)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Role,
    pub gym_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gym_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            role: user.role,
            gym_id: user.gym_id,
            gym_name: None,
            created_at: user.created_at,
        }
    }
}

impl From<UserListing> for UserResponse {
    fn from(listing: UserListing) -> Self {
        Self {
            gym_name: listing.gym_name,
            ..Self::from(listing.user)
        }
    }
}

/// Gym response
#[derive(Debug, Serialize, Deserialize)]
pub struct GymResponse {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Gym> for GymResponse {
    fn from(gym: Gym) -> Self {
        Self {
            id: gym.id,
            name: gym.name,
            address: gym.address,
            phone_number: gym.phone_number,
            is_active: gym.is_active,
            created_at: gym.created_at,
            updated_at: gym.updated_at,
        }
    }
}

/// Service offering response
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub service_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_minutes: i32,
    pub gym_id: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gym_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ServiceOffering> for ServiceResponse {
    fn from(s: ServiceOffering) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            service_type: s.service_type,
            price: s.price,
            duration_minutes: s.duration_minutes,
            gym_id: s.gym_id,
            gym_name: None,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<OfferingListing> for ServiceResponse {
    fn from(listing: OfferingListing) -> Self {
        Self {
            gym_name: Some(listing.gym_name),
            ..Self::from(listing.offering)
        }
    }
}

/// Appointment with resolved names
#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub member_id: i64,
    pub member_name: String,
    pub trainer_id: i64,
    pub trainer_name: String,
    pub service_id: i64,
    pub service_name: String,
    pub gym_id: i64,
    pub gym_name: String,
    pub status: AppointmentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub canceled_by: Option<String>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl From<AppointmentDetail> for AppointmentResponse {
    fn from(detail: AppointmentDetail) -> Self {
        let a = detail.appointment;
        Self {
            id: a.id,
            date: a.date,
            time: a.time,
            member_id: a.member_id,
            member_name: detail.member_name,
            trainer_id: a.trainer_id,
            trainer_name: detail.trainer_name,
            service_id: a.service_id,
            service_name: detail.service_name,
            gym_id: a.gym_id,
            gym_name: detail.gym_name,
            status: a.status,
            price: a.price,
            created_at: a.created_at,
            canceled_by: a.canceled_by,
            canceled_at: a.canceled_at,
        }
    }
}

/// Post response
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub visibility: PostVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            visibility: post.visibility,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Value read through the cache proxy
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntryResponse {
    pub key: String,
    pub value: String,
}

/// Acknowledgement of a cache proxy write or delete
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheKeyResponse {
    pub message: String,
    pub key: String,
}

/// Fitness recommendation outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn success(recommendation: String) -> Self {
        Self {
            success: true,
            recommendation: Some(recommendation),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            recommendation: None,
            message: Some(message.into()),
        }
    }
}
