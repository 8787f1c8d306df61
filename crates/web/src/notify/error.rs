//! Notification errors.

use thiserror::Error;

/// Errors that can occur when delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed (connect, timeout, TLS).
    #[error("Telegram request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Telegram response error: {0}")]
    Response(String),

    /// Telegram API returned `ok: false`.
    #[error("Telegram API error: {0}")]
    Api(String),

    /// Client could not be built from configuration.
    #[error("Telegram configuration error: {0}")]
    Config(String),
}
