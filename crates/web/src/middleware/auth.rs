//! Session guard: authentication state, extractors and login/logout.
//!
//! A session is either unauthenticated (the initial state) or authenticated.
//! It only becomes authenticated through [`login`] and leaves that state
//! through [`logout`] or session expiry.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::flash;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::models::{CurrentAdmin, FlashLevel, session_keys};
use crate::services::{AuthError, AuthService};

/// Flash shown when a protected page is requested without logging in.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must log in to access this page.";

/// Result of checking a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Authorized(CurrentAdmin),
    Unauthorized,
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authorized(CurrentAdmin),
    Rejected,
}

/// Check whether the session is authenticated.
///
/// Unreadable session data counts as unauthenticated.
pub async fn require_authenticated(session: &Session) -> Access {
    let logged_in = session
        .get::<bool>(session_keys::LOGGED_IN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    if !logged_in {
        return Access::Unauthorized;
    }

    match session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
    {
        Some(admin) => Access::Authorized(admin),
        None => Access::Unauthorized,
    }
}

/// Verify credentials and, on success, mark the session authenticated.
///
/// The session ID is cycled on success. On rejection the session is left
/// unauthenticated.
///
/// # Errors
///
/// Returns `AppError::Database` if the admin store is unavailable and
/// `AppError::Session` if the session cannot be written.
pub async fn login(
    session: &Session,
    auth: &AuthService<'_>,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, AppError> {
    let admin = match auth.login(username, password).await {
        Ok(admin) => admin,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(username = %username, "Admin login rejected");
            return Ok(LoginOutcome::Rejected);
        }
        Err(AuthError::Repository(e)) => return Err(AppError::Database(e)),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let current = CurrentAdmin {
        id: admin.id,
        username: admin.username,
    };

    session.cycle_id().await?;
    set_current_admin(session, &current).await?;
    set_sentry_user(current.id.as_i32(), &current.username);
    tracing::info!(admin_id = %current.id, username = %current.username, "Admin logged in");

    Ok(LoginOutcome::Authorized(current))
}

/// Clear the authenticated state. Calling it on an unauthenticated session
/// is a no-op.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn logout(session: &Session) -> Result<(), tower_sessions::session::Error> {
    clear_current_admin(session).await?;
    clear_sentry_user();
    Ok(())
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await?;
    session.insert(session_keys::LOGGED_IN, true).await
}

/// Helper to clear the current admin from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::LOGGED_IN, false).await?;
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

/// Extractor that requires admin authentication.
///
/// If the admin is not logged in, queues a warning flash and redirects to
/// the login page before the handler runs.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// No session layer installed.
    MissingSession,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::MissingSession => {
                tracing::error!("RequireAdmin used without a session layer");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::MissingSession)?;

        match require_authenticated(session).await {
            Access::Authorized(admin) => Ok(Self(admin)),
            Access::Unauthorized => {
                if let Err(e) = flash::push(session, FlashLevel::Warning, LOGIN_REQUIRED_MESSAGE).await
                {
                    tracing::warn!(error = %e, "Failed to queue login flash");
                }
                Err(AdminAuthRejection::RedirectToLogin)
            }
        }
    }
}
