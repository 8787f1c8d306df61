//! Intake record domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use deposit_core::IntakeId;

/// Maximum stored length of the customer name and email.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum stored length of the customer phone.
pub const PHONE_MAX_LEN: usize = 20;
/// Maximum stored length of the item category.
pub const CATEGORY_MAX_LEN: usize = 50;
/// Maximum stored length of the quoted price and recommended box.
pub const QUOTE_FIELD_MAX_LEN: usize = 50;

/// A validated intake submission, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIntake {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub item_category: String,
    pub item_description: String,
    pub volume_m3: f64,
    /// Price exactly as quoted to the customer.
    pub quoted_price: String,
    /// Box label exactly as quoted to the customer.
    pub recommended_box: String,
}

/// A stored intake record.
///
/// Records are append-only; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeRecord {
    pub id: IntakeId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub item_category: String,
    pub item_description: String,
    pub volume_m3: f64,
    pub quoted_price: String,
    pub recommended_box: String,
    pub created_at: DateTime<Utc>,
}

impl IntakeRecord {
    /// Assemble a stored record from a submission and the values the store
    /// assigned.
    #[must_use]
    pub fn from_new(id: IntakeId, created_at: DateTime<Utc>, intake: NewIntake) -> Self {
        Self {
            id,
            customer_name: intake.customer_name,
            customer_email: intake.customer_email,
            customer_phone: intake.customer_phone,
            item_category: intake.item_category,
            item_description: intake.item_description,
            volume_m3: intake.volume_m3,
            quoted_price: intake.quoted_price,
            recommended_box: intake.recommended_box,
            created_at,
        }
    }

    /// Phone number for display, `"N/A"` when the customer left it blank.
    #[must_use]
    pub fn phone_display(&self) -> &str {
        self.customer_phone.as_deref().unwrap_or("N/A")
    }

    /// Creation time formatted for the records table.
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}
