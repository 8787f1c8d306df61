//! Business logic services for the deposit service.
//!
//! # Services
//!
//! - `auth` - Admin login and account bootstrap
//! - `intake` - Intake validation, persistence and listing

pub mod auth;
pub mod intake;

pub use auth::{AuthError, AuthService};
pub use intake::{IntakeError, IntakeForm, IntakeService, ValidationError};
