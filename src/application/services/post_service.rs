//! Post Service
//!
//! Posts with a cache-aside read path. Single posts are cached under
//! `post:{id}`; every write through this service drops the cached copy.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AccessPolicy, Actor, Capability, Post, PostRepository, PostVisibility};
use crate::infrastructure::cache::{keys, Cache, CacheExt};
use crate::shared::error::AppError;

/// Writable post fields
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub visibility: PostVisibility,
}

/// Post service trait for dependency injection
#[async_trait]
pub trait PostService: Send + Sync {
    /// Public posts, or all posts for admins. An empty result is `NotFound`.
    async fn list(&self, actor: Option<&Actor>) -> Result<Vec<Post>, AppError>;

    /// Read one post through the cache.
    async fn get(&self, actor: Option<&Actor>, id: i64) -> Result<Post, AppError>;

    async fn create(&self, actor: &Actor, input: PostInput) -> Result<Post, AppError>;

    async fn update(&self, actor: &Actor, id: i64, input: PostInput) -> Result<Post, AppError>;

    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError>;
}

/// PostService implementation
pub struct PostServiceImpl {
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn Cache>,
    ttl_seconds: u64,
}

impl PostServiceImpl {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Arc<dyn Cache>, ttl_seconds: u64) -> Self {
        Self {
            posts,
            cache,
            ttl_seconds,
        }
    }

    async fn invalidate(&self, id: i64) -> Result<(), AppError> {
        self.cache.delete(&keys::post(id)).await?;
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Post with id {} not found", id))
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn list(&self, actor: Option<&Actor>) -> Result<Vec<Post>, AppError> {
        let posts = self
            .posts
            .list(AccessPolicy::sees_private_posts(actor))
            .await?;

        if posts.is_empty() {
            return Err(AppError::NotFound("No posts found".into()));
        }
        Ok(posts)
    }

    async fn get(&self, actor: Option<&Actor>, id: i64) -> Result<Post, AppError> {
        let key = keys::post(id);

        let post = match self.cache.get_json::<Post>(&key).await? {
            Some(post) => {
                tracing::debug!(post_id = id, "Post served from cache");
                post
            }
            None => {
                let post = self.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
                self.cache
                    .set_json(&key, &post, Some(self.ttl_seconds))
                    .await?;
                tracing::debug!(post_id = id, "Post cached");
                post
            }
        };

        if !post.is_public() && !AccessPolicy::sees_private_posts(actor) {
            return Err(AppError::Forbidden("This post is private".into()));
        }
        Ok(post)
    }

    async fn create(&self, actor: &Actor, input: PostInput) -> Result<Post, AppError> {
        AccessPolicy::check(actor, Capability::ManagePosts).require()?;

        let now = Utc::now();
        let post = Post {
            id: 0,
            title: input.title,
            content: input.content,
            visibility: input.visibility,
            created_at: now,
            updated_at: now,
        };
        let created = self.posts.create(&post).await?;

        tracing::info!(post_id = created.id, "Post created");
        Ok(created)
    }

    async fn update(&self, actor: &Actor, id: i64, input: PostInput) -> Result<Post, AppError> {
        AccessPolicy::check(actor, Capability::ManagePosts).require()?;

        let mut post = self.posts.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        post.title = input.title;
        post.content = input.content;
        post.visibility = input.visibility;
        post.updated_at = Utc::now();

        let updated = self.posts.update(&post).await?;
        self.invalidate(id).await?;

        tracing::info!(post_id = id, "Post updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &Actor, id: i64) -> Result<(), AppError> {
        AccessPolicy::check(actor, Capability::ManagePosts).require()?;

        self.posts.delete(id).await?;
        self.invalidate(id).await?;

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}
