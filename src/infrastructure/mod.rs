//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - Cache implementations (Redis)
//! - The Gemini text-generation client

pub mod ai;
pub mod cache;
pub mod database;
pub mod repositories;
