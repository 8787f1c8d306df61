//! Admin user domain types.

use chrono::{DateTime, Utc};

use deposit_core::AdminUserId;

/// A staff account allowed to view intake records.
///
/// The password hash is an Argon2 PHC string and never leaves the server.
#[derive(Clone)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Login name (unique, case-sensitive).
    pub username: String,
    /// Argon2 password hash in PHC string format.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
