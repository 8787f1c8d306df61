//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the admin account (no-op if it already exists)
//! deposit-cli admin create -u admin -p 'a-strong-password'
//!
//! # Replace the password of an existing admin
//! deposit-cli admin set-password -u admin -p 'another-password'
//! ```
//!
//! # Environment Variables
//!
//! - `DEPOSIT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use thiserror::Error;

use deposit_web::db::{self, PgAdminRepository};
use deposit_web::services::{AuthError, AuthService};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account could not be created or updated.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

async fn repository() -> Result<PgAdminRepository, AdminError> {
    let database_url =
        super::database_url().ok_or(AdminError::MissingEnvVar("DEPOSIT_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;
    Ok(PgAdminRepository::new(pool))
}

/// Create an admin account unless it already exists.
///
/// Returns whether a new account was created.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the password is too weak.
pub async fn create_user(username: &str, password: &str) -> Result<bool, AdminError> {
    let repo = repository().await?;
    let created = AuthService::new(&repo)
        .seed_default_admin_if_absent(username, password)
        .await?;

    if created {
        tracing::info!("Created admin user: {}", username);
    } else {
        tracing::warn!("Admin user {} already exists; password left unchanged", username);
    }
    Ok(created)
}

/// Replace an admin's password.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the admin does not exist
/// or the password is too weak.
pub async fn set_password(username: &str, password: &str) -> Result<(), AdminError> {
    let repo = repository().await?;
    AuthService::new(&repo)
        .set_password(username, password)
        .await?;

    tracing::info!("Password updated for admin user: {}", username);
    Ok(())
}
