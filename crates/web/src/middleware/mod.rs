//! HTTP middleware and extractors.
//!
//! # Layer Order (outermost first)
//!
//! 1. Sentry layers (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store, signed cookie)
//!
//! Route protection uses the [`RequireAdmin`] extractor rather than a layer.

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{
    Access, AdminAuthRejection, LoginOutcome, RequireAdmin, clear_current_admin, login, logout,
    require_authenticated, set_current_admin,
};
pub use flash::Flashes;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
