//! Quote API.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use deposit_core::BoxSize;

use crate::state::AppState;

/// Successful quote.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub precio: i64,
    pub caja_recomendada: BoxSize,
}

/// Quote failure.
#[derive(Debug, Serialize)]
pub struct QuoteError {
    pub error: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/calcular_precio", post(compute_quote))
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(QuoteError {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Extract `volumen` from a JSON body. Accepts a number or a numeric string.
///
/// # Errors
///
/// Returns the client-facing error message.
pub fn parse_quote_request(body: &[u8]) -> Result<f64, &'static str> {
    const INVALID_JSON: &str = "Invalid JSON: expected a number for \"volumen\".";
    const INVALID_VOLUME: &str = "Volume must be a valid number.";

    let value: Value = serde_json::from_slice(body).map_err(|_| INVALID_JSON)?;
    let volume = match value.get("volumen") {
        Some(Value::Number(n)) => n.as_f64().ok_or(INVALID_VOLUME)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| INVALID_VOLUME)?,
        _ => return Err(INVALID_JSON),
    };
    if !volume.is_finite() {
        return Err(INVALID_VOLUME);
    }
    Ok(volume)
}

/// POST /calcular_precio
#[instrument(skip_all)]
async fn compute_quote(State(state): State<AppState>, body: Bytes) -> Response {
    let volume = match parse_quote_request(&body) {
        Ok(volume) => volume,
        Err(message) => {
            tracing::debug!(error = message, "Rejected quote request");
            return bad_request(message);
        }
    };

    let quote = state.pricing().quote(volume);
    tracing::debug!(volume_m3 = volume, price = quote.price.amount, box_size = %quote.box_size, "Quoted");

    Json(QuoteResponse {
        precio: quote.price.amount,
        caja_recomendada: quote.box_size,
    })
    .into_response()
}
