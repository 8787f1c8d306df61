//! Intake form submission.

use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::Redirect,
    routing::post,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::flash;
use crate::models::FlashLevel;
use crate::notify::build_intake_message;
use crate::services::{IntakeError, IntakeForm};
use crate::state::AppState;

/// Flash shown after a stored submission.
pub const SUCCESS_MESSAGE: &str =
    "Your deposit request has been registered! We will contact you shortly.";

pub fn router() -> Router<AppState> {
    Router::new().route("/registrar_producto", post(submit_intake))
}

/// POST /registrar_producto
///
/// Always redirects back to the calculator. The notification outcome never
/// affects the response.
#[instrument(skip_all)]
async fn submit_intake(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<IntakeForm>, FormRejection>,
) -> Redirect {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::info!(error = %rejection, "Malformed intake form");
            flash_or_log(
                &session,
                FlashLevel::Danger,
                format!("Could not process your request: {}", rejection.body_text()),
            )
            .await;
            return Redirect::to("/calculadora");
        }
    };

    match state.intake_service().create_intake(&form).await {
        Ok(record) => {
            let message = build_intake_message(&record, state.pricing().currency());
            let outcome = state.notifications().notify(&message).await;
            tracing::debug!(intake_id = %record.id, ?outcome, "Intake notification handled");
            flash_or_log(&session, FlashLevel::Success, SUCCESS_MESSAGE).await;
        }
        Err(IntakeError::Validation(e)) => {
            tracing::info!(field = e.field(), error = %e, "Intake rejected");
            flash_or_log(
                &session,
                FlashLevel::Danger,
                format!("Could not process your request: {e}"),
            )
            .await;
        }
        Err(IntakeError::Storage(e)) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to store intake");
            flash_or_log(
                &session,
                FlashLevel::Danger,
                "Could not process your request. Please try again later.",
            )
            .await;
        }
    }

    Redirect::to("/calculadora")
}

async fn flash_or_log(session: &Session, level: FlashLevel, text: impl Into<String>) {
    if let Err(e) = flash::push(session, level, text).await {
        tracing::warn!(error = %e, "Failed to queue flash message");
    }
}
