//! Relational store for the WorkNet backend.
//!
//! One `Database` handle serves both backing stores: SQLite for local
//! development and PostgreSQL in production, selected from the connection
//! URL. All SQL in this crate is written once, with `?` placeholders; the
//! execution shim in [`client`] rewrites placeholders for PostgreSQL,
//! binds booleans and timestamps as typed parameters, retrieves
//! autoincrement ids on either backend, and normalizes rows into the
//! dict-shaped [`SqlRow`].

pub mod client;
pub mod courses_repo;
pub mod error;
pub mod jobs_repo;
pub mod plans_repo;
pub mod repos;
pub mod schema;
pub mod types;

// Re-export common types
pub use client::{Database, Dialect};
pub use courses_repo::CourseRepository;
pub use error::{StoreError, StoreResult};
pub use jobs_repo::{ApplicationRepository, JobRepository};
pub use plans_repo::{PlanRepository, SubscriptionRepository};
pub use repos::{ProfileRepository, UserRepository};
pub use schema::{init_schema, seed_default_plans};
pub use types::{FromSqlValue, SqlParam, SqlRow, SqlValue};
