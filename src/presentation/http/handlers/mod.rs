//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod ai;
pub mod appointment;
pub mod auth;
pub mod cache;
pub mod gym;
pub mod health;
pub mod post;
pub mod service;
pub mod user;
