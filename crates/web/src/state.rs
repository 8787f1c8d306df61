//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use deposit_core::PricingEngine;

use crate::config::DepositConfig;
use crate::db::{
    AdminRepository, IntakeRepository, MemoryAdminRepository, MemoryIntakeRepository,
    PgAdminRepository, PgIntakeRepository,
};
use crate::notify::{NotificationSink, NotifyError, TelegramClient};
use crate::services::{AuthService, IntakeService};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    intakes: Arc<dyn IntakeRepository>,
    admins: Arc<dyn AdminRepository>,
    notifications: NotificationSink,
    pricing: PricingEngine,
    pool: Option<PgPool>,
}

impl AppState {
    /// Build production state over a `PostgreSQL` pool.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Config` if the Telegram client cannot be built.
    pub fn from_config(config: &DepositConfig, pool: PgPool) -> Result<Self, NotifyError> {
        let notifications = match config.telegram() {
            Some(telegram) => NotificationSink::new(Arc::new(TelegramClient::new(telegram)?)),
            None => {
                tracing::warn!("Telegram not configured; intake notifications disabled");
                NotificationSink::disabled()
            }
        };

        Ok(Self::builder()
            .intakes(Arc::new(PgIntakeRepository::new(pool.clone())))
            .admins(Arc::new(PgAdminRepository::new(pool.clone())))
            .notifications(notifications)
            .pricing(config.pricing.engine())
            .pool(pool)
            .build())
    }

    /// Start building state. Unset parts default to in-memory stores,
    /// disabled notifications and reference pricing.
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    #[must_use]
    pub fn intakes(&self) -> &dyn IntakeRepository {
        self.inner.intakes.as_ref()
    }

    #[must_use]
    pub fn admins(&self) -> &dyn AdminRepository {
        self.inner.admins.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationSink {
        &self.inner.notifications
    }

    #[must_use]
    pub fn pricing(&self) -> &PricingEngine {
        &self.inner.pricing
    }

    /// Database pool, absent when running on in-memory stores.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Intake service bound to this state's store and pricing.
    #[must_use]
    pub fn intake_service(&self) -> IntakeService<'_> {
        IntakeService::new(self.intakes(), self.pricing())
    }

    /// Auth service bound to this state's admin store.
    #[must_use]
    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(self.admins())
    }
}

/// Builder for [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    intakes: Option<Arc<dyn IntakeRepository>>,
    admins: Option<Arc<dyn AdminRepository>>,
    notifications: Option<NotificationSink>,
    pricing: Option<PricingEngine>,
    pool: Option<PgPool>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn intakes(mut self, intakes: Arc<dyn IntakeRepository>) -> Self {
        self.intakes = Some(intakes);
        self
    }

    #[must_use]
    pub fn admins(mut self, admins: Arc<dyn AdminRepository>) -> Self {
        self.admins = Some(admins);
        self
    }

    #[must_use]
    pub fn notifications(mut self, notifications: NotificationSink) -> Self {
        self.notifications = Some(notifications);
        self
    }

    #[must_use]
    pub fn pricing(mut self, pricing: PricingEngine) -> Self {
        self.pricing = Some(pricing);
        self
    }

    #[must_use]
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn build(self) -> AppState {
        AppState {
            inner: Arc::new(AppStateInner {
                intakes: self
                    .intakes
                    .unwrap_or_else(|| Arc::new(MemoryIntakeRepository::new())),
                admins: self
                    .admins
                    .unwrap_or_else(|| Arc::new(MemoryAdminRepository::new())),
                notifications: self.notifications.unwrap_or_default(),
                pricing: self.pricing.unwrap_or_default(),
                pool: self.pool,
            }),
        }
    }
}
