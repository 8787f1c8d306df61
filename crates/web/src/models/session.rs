//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state and one-shot
//! flash messages.

use serde::{Deserialize, Serialize};

use deposit_core::AdminUserId;

/// Session-stored admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Admin's login name.
    pub username: String,
}

/// Severity of a flash message, used as the alert style in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashLevel {
    /// CSS class suffix for the alert.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(level: FlashLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Set to `true` while an admin is logged in.
    pub const LOGGED_IN: &str = "logged_in";

    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Pending flash messages.
    pub const FLASH: &str = "flash";
}
