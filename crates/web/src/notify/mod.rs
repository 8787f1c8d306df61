//! Best-effort notifications for new intakes.
//!
//! This module provides:
//! - [`Notifier`], the transport seam
//! - [`TelegramClient`], the Telegram Bot API transport
//! - [`NotificationSink`], which never lets a delivery problem reach the caller
//! - Message builders for intake announcements

mod client;
mod error;
mod messages;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::{REQUEST_TIMEOUT, TelegramClient};
pub use error::NotifyError;
pub use messages::{build_intake_message, escape_html};

/// A transport able to deliver a single text message.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short transport name for logs.
    fn name(&self) -> &'static str;

    /// Attempt one delivery. Implementations must not retry.
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Delivered to the transport.
    Sent,
    /// No transport configured.
    Skipped,
    /// Delivery attempted and failed.
    Failed,
}

/// Wraps an optional transport and absorbs its failures.
#[derive(Clone, Default)]
pub struct NotificationSink {
    notifier: Option<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for NotificationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationSink")
            .field("notifier", &self.notifier.as_ref().map(|n| n.name()))
            .finish()
    }
}

impl NotificationSink {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
        }
    }

    /// A sink that skips every message.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Deliver a message at most once. Never returns an error.
    pub async fn notify(&self, message: &str) -> NotifyOutcome {
        let Some(notifier) = &self.notifier else {
            tracing::info!("Notification skipped: no transport configured");
            return NotifyOutcome::Skipped;
        };

        match notifier.send(message).await {
            Ok(()) => {
                tracing::info!(transport = notifier.name(), "Notification sent");
                NotifyOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(transport = notifier.name(), error = %e, "Notification failed");
                NotifyOutcome::Failed
            }
        }
    }
}
