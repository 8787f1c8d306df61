//! Admin intake listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flashes, RequireAdmin};
use crate::models::{CurrentAdmin, FlashMessage, IntakeRecord};
use crate::state::AppState;

/// Intake records page.
#[derive(Template, WebTemplate)]
#[template(path = "pages/registros.html")]
pub struct RecordsTemplate {
    pub flashes: Vec<FlashMessage>,
    pub admin: CurrentAdmin,
    pub records: Vec<IntakeRecord>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/registros", get(list_intakes))
}

/// GET /registros
#[instrument(skip_all)]
async fn list_intakes(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Flashes(flashes): Flashes,
) -> Result<impl IntoResponse, AppError> {
    let records = state.intake_service().list_intakes().await?;
    tracing::debug!(admin = %admin.username, count = records.len(), "Listing intakes");

    Ok(RecordsTemplate {
        flashes,
        admin,
        records,
    })
}
