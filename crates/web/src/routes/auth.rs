//! Authentication route handlers.
//!
//! Provides the login page, username/password login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flashes, LoginOutcome, flash, login, logout};
use crate::models::{FlashLevel, FlashMessage};
use crate::state::AppState;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully.";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/login.html")]
pub struct LoginPageTemplate {
    pub flashes: Vec<FlashMessage>,
    pub username: String,
}

/// Login form fields.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout_handler).post(logout_handler))
}

/// Render the login page.
///
/// GET /login
async fn login_page(Flashes(flashes): Flashes) -> impl IntoResponse {
    LoginPageTemplate {
        flashes,
        username: String::new(),
    }
}

/// Verify credentials and start an admin session.
///
/// Pending flash messages are left in the session on success so the next
/// page shows them.
///
/// POST /login
#[instrument(skip_all)]
async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = state.auth_service();
    match login(&session, &auth, &form.username, &form.password).await? {
        LoginOutcome::Authorized(_) => {
            flash::push(&session, FlashLevel::Success, LOGIN_SUCCESS_MESSAGE).await?;
            Ok(Redirect::to("/registros").into_response())
        }
        LoginOutcome::Rejected => {
            let mut flashes = flash::take(&session).await;
            flashes.push(FlashMessage::new(FlashLevel::Danger, LOGIN_FAILED_MESSAGE));
            Ok(LoginPageTemplate {
                flashes,
                username: form.username,
            }
            .into_response())
        }
    }
}

/// Logout and clear the authenticated state.
///
/// GET|POST /logout
async fn logout_handler(session: Session) -> Result<Redirect, AppError> {
    logout(&session).await?;
    flash::push(&session, FlashLevel::Info, LOGGED_OUT_MESSAGE).await?;
    Ok(Redirect::to("/login"))
}
