//! One-shot flash messages stored in the session.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::models::{FlashLevel, FlashMessage, session_keys};

/// Queue a message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn push(
    session: &Session,
    level: FlashLevel,
    text: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut pending: Vec<FlashMessage> = session
        .get(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    pending.push(FlashMessage::new(level, text));
    session.insert(session_keys::FLASH, pending).await
}

/// Remove and return all pending messages.
pub async fn take(session: &Session) -> Vec<FlashMessage> {
    match session.remove::<Vec<FlashMessage>>(session_keys::FLASH).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}

/// Extractor yielding (and consuming) pending flash messages.
///
/// Yields nothing when no session layer is installed.
pub struct Flashes(pub Vec<FlashMessage>);

impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let messages = match parts.extensions.get::<Session>() {
            Some(session) => take(session).await,
            None => Vec::new(),
        };
        Ok(Self(messages))
    }
}
