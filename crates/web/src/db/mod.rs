//! Database operations for the deposit service.
//!
//! # Tables
//!
//! - `intake_record` - Submitted storage intake forms
//! - `admin_user` - Staff accounts allowed to view intake records
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p deposit-cli -- migrate
//! ```
//!
//! Handlers never talk to `PgPool` directly. They go through the
//! [`IntakeRepository`] and [`AdminRepository`] traits so the router can run
//! against the in-memory implementations in [`memory`].

pub mod admin_users;
pub mod intakes;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::models::{AdminUser, IntakeRecord, NewIntake};

pub use admin_users::PgAdminRepository;
pub use intakes::PgIntakeRepository;
pub use memory::{MemoryAdminRepository, MemoryIntakeRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Store could not be reached (used by the in-memory store when failing).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for intake records.
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Persist a validated intake and return the stored record with its
    /// assigned ID and creation timestamp.
    async fn insert(&self, intake: &NewIntake) -> Result<IntakeRecord, RepositoryError>;

    /// All intake records, newest first.
    async fn list_newest_first(&self) -> Result<Vec<IntakeRecord>, RepositoryError>;
}

/// Persistence for admin credentials.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up an admin by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError>;

    /// Create an admin unless one with the same username exists.
    ///
    /// Returns `true` if a row was inserted.
    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;

    /// Replace the stored password hash for an existing admin.
    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
pub(crate) fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
