//! Public pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
};

use crate::filters;
use crate::middleware::Flashes;
use crate::models::FlashMessage;
use crate::state::AppState;

/// Quote calculator and intake form.
#[derive(Template, WebTemplate)]
#[template(path = "pages/calculadora.html")]
pub struct CalculatorTemplate {
    pub flashes: Vec<FlashMessage>,
    pub currency_code: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/calculadora", get(calculator))
}

/// GET /
async fn index() -> Redirect {
    Redirect::to("/calculadora")
}

/// GET /calculadora
async fn calculator(State(state): State<AppState>, Flashes(flashes): Flashes) -> impl IntoResponse {
    CalculatorTemplate {
        flashes,
        currency_code: state.pricing().currency().code(),
    }
}
