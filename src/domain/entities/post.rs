//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Who may read a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PostVisibility {
    #[default]
    Public,
    Private,
}

impl PostVisibility {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Private" => Self::Private,
            _ => Self::Public,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

/// A published post.
///
/// Maps to the `posts` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - title: VARCHAR(200) NOT NULL
/// - content: TEXT NOT NULL
/// - visibility: VARCHAR(16) NOT NULL DEFAULT 'Public'
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub visibility: PostVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_public(&self) -> bool {
        self.visibility == PostVisibility::Public
    }
}

/// Repository trait for Post data access operations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List posts, optionally including private ones.
    async fn list(&self, include_private: bool) -> Result<Vec<Post>, AppError>;

    /// Find a post by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Insert a post; the `id` field is ignored.
    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    /// Update an existing post.
    async fn update(&self, post: &Post) -> Result<Post, AppError>;

    /// Delete a post.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
