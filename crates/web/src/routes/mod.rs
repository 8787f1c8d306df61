//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Public
//! GET  /                       - Redirect to the calculator
//! GET  /calculadora            - Quote calculator and intake form
//! POST /calcular_precio        - Quote a volume (JSON)
//! POST /registrar_producto     - Submit an intake (form)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Username/password login
//! GET  /logout                 - Logout (POST also accepted)
//!
//! # Admin (session required)
//! GET  /registros              - Intake records, newest first
//! ```

pub mod auth;
pub mod intake;
pub mod pages;
pub mod quote;
pub mod records;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Directory holding stylesheets and other static assets.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// All application routes, without state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(pages::router())
        .merge(quote::router())
        .merge(intake::router())
        .merge(auth::router())
        .merge(records::router())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
}

/// Routes bound to `state`.
///
/// Session, tracing and Sentry layers are added by the caller.
pub fn app(state: AppState) -> Router {
    routes().with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
