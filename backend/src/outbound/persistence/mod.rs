//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map
//! driver failures onto port error variants. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) never leave this module.

mod diesel_community_code_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_community_code_repository::DieselCommunityCodeRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
