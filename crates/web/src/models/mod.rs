//! Domain models for the deposit service.

pub mod admin_user;
pub mod intake;
pub mod session;

pub use admin_user::AdminUser;
pub use intake::{IntakeRecord, NewIntake};
pub use session::{CurrentAdmin, FlashLevel, FlashMessage, keys as session_keys};
