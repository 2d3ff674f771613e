//! Axum HTTP API server.
//!
//! This crate provides:
//! - Registration/login by role with Argon2id password hashing
//! - Signed session tokens (cookie or Bearer)
//! - CRUD routes over profiles, jobs, applications, courses, and plans
//! - Rate limiting and security headers

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod security;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::AccountService;
pub use state::AppState;
