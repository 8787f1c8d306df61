//! Intake submission service.
//!
//! Turns raw form fields into a validated [`NewIntake`], persists it and
//! lists stored records.

use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use deposit_core::PricingEngine;

use crate::db::{IntakeRepository, RepositoryError};
use crate::models::intake::{
    CATEGORY_MAX_LEN, NAME_MAX_LEN, PHONE_MAX_LEN, QUOTE_FIELD_MAX_LEN,
};
use crate::models::{IntakeRecord, NewIntake};

/// A submitted field that is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("field {field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("field {0} must be a non-negative number")]
    InvalidVolume(&'static str),
}

impl ValidationError {
    /// Name of the offending form field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing(field) | Self::InvalidVolume(field) | Self::TooLong { field, .. } => {
                field
            }
        }
    }
}

/// Errors from creating an intake.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage failed: {0}")]
    Storage(#[from] RepositoryError),
}

/// Raw intake form as posted by the calculator page.
///
/// Every field is optional at this level so that a missing field becomes a
/// `ValidationError` rather than a form rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeForm {
    #[serde(rename = "nombre_cliente")]
    pub customer_name: Option<String>,
    #[serde(rename = "email_cliente")]
    pub customer_email: Option<String>,
    #[serde(rename = "telefono_cliente")]
    pub customer_phone: Option<String>,
    #[serde(rename = "tipo_objeto")]
    pub item_category: Option<String>,
    #[serde(rename = "nombre_objeto")]
    pub item_description: Option<String>,
    #[serde(rename = "volumen")]
    pub volume: Option<String>,
    #[serde(rename = "precio_calculado")]
    pub quoted_price: Option<String>,
    #[serde(rename = "caja_recomendada")]
    pub recommended_box: Option<String>,
}

impl IntakeForm {
    /// Validate the form into a [`NewIntake`].
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, in form order.
    pub fn validate(&self) -> Result<NewIntake, ValidationError> {
        let customer_name = required(self.customer_name.as_deref(), "nombre_cliente", NAME_MAX_LEN)?;
        let customer_email =
            required(self.customer_email.as_deref(), "email_cliente", NAME_MAX_LEN)?;
        let customer_phone = optional(
            self.customer_phone.as_deref(),
            "telefono_cliente",
            PHONE_MAX_LEN,
        )?;
        let item_category = required(self.item_category.as_deref(), "tipo_objeto", CATEGORY_MAX_LEN)?;
        let item_description =
            required(self.item_description.as_deref(), "nombre_objeto", usize::MAX)?;
        let volume_m3 = parse_volume(self.volume.as_deref(), "volumen")?;
        let quoted_price = required(
            self.quoted_price.as_deref(),
            "precio_calculado",
            QUOTE_FIELD_MAX_LEN,
        )?;
        let recommended_box = required(
            self.recommended_box.as_deref(),
            "caja_recomendada",
            QUOTE_FIELD_MAX_LEN,
        )?;

        Ok(NewIntake {
            customer_name,
            customer_email,
            customer_phone,
            item_category,
            item_description,
            volume_m3,
            quoted_price,
            recommended_box,
        })
    }
}

fn required(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    optional(value, field, max)?.ok_or(ValidationError::Missing(field))
}

fn optional(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(value.to_string()))
}

/// Parse a volume in cubic meters. Zero is accepted; negative, non-finite
/// and non-numeric input is not.
///
/// # Errors
///
/// Returns `ValidationError::Missing` for absent or blank input and
/// `ValidationError::InvalidVolume` otherwise.
pub fn parse_volume(value: Option<&str>, field: &'static str) -> Result<f64, ValidationError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(field))?;
    let volume: f64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidVolume(field))?;
    if !volume.is_finite() || volume < 0.0 {
        return Err(ValidationError::InvalidVolume(field));
    }
    Ok(volume)
}

/// Intake service over an injected repository.
pub struct IntakeService<'a> {
    intakes: &'a dyn IntakeRepository,
    pricing: &'a PricingEngine,
}

impl<'a> IntakeService<'a> {
    #[must_use]
    pub const fn new(intakes: &'a dyn IntakeRepository, pricing: &'a PricingEngine) -> Self {
        Self { intakes, pricing }
    }

    /// Validate and persist an intake.
    ///
    /// The quoted price and box are stored exactly as submitted. A mismatch
    /// with the server-side quote is logged but not rejected.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::Validation` without touching the store, or
    /// `IntakeError::Storage` if the insert fails (no row is written).
    #[instrument(skip(self, form))]
    pub async fn create_intake(&self, form: &IntakeForm) -> Result<IntakeRecord, IntakeError> {
        let intake = form.validate()?;
        self.check_quote(&intake);

        let record = self.intakes.insert(&intake).await?;
        tracing::info!(intake_id = %record.id, volume_m3 = record.volume_m3, "Intake recorded");
        Ok(record)
    }

    /// All intake records, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read.
    pub async fn list_intakes(&self) -> Result<Vec<IntakeRecord>, RepositoryError> {
        self.intakes.list_newest_first().await
    }

    fn check_quote(&self, intake: &NewIntake) {
        let quote = self.pricing.quote(intake.volume_m3);
        let expected_price = quote.price.amount_string();
        if intake.quoted_price != expected_price
            || intake.recommended_box != quote.box_size.label()
        {
            tracing::warn!(
                volume_m3 = intake.volume_m3,
                submitted_price = %intake.quoted_price,
                expected_price = %expected_price,
                submitted_box = %intake.recommended_box,
                expected_box = %quote.box_size,
                "Submitted quote differs from server quote"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryIntakeRepository;

    fn complete_form() -> IntakeForm {
        IntakeForm {
            customer_name: Some("Ana Pérez".to_string()),
            customer_email: Some("ana@example.com".to_string()),
            customer_phone: Some(String::new()),
            item_category: Some("furniture".to_string()),
            item_description: Some("sofa and two chairs".to_string()),
            volume: Some("2.0".to_string()),
            quoted_price: Some("17000".to_string()),
            recommended_box: Some("large box".to_string()),
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let intake = complete_form().validate();
        let Ok(intake) = intake else {
            panic!("form should validate");
        };
        assert!((intake.volume_m3 - 2.0).abs() < f64::EPSILON);
        assert_eq!(intake.customer_phone, None);
        assert_eq!(intake.quoted_price, "17000");
    }

    #[test]
    fn test_missing_email_names_the_field() {
        let form = IntakeForm {
            customer_email: None,
            ..complete_form()
        };
        let err = form.validate().err();
        assert_eq!(err, Some(ValidationError::Missing("email_cliente")));
        assert_eq!(err.map(|e| e.field()), Some("email_cliente"));
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let form = IntakeForm {
            item_category: Some("   ".to_string()),
            ..complete_form()
        };
        assert_eq!(form.validate().err(), Some(ValidationError::Missing("tipo_objeto")));
    }

    #[test]
    fn test_volume_parsing() {
        assert_eq!(parse_volume(Some("0"), "volumen"), Ok(0.0));
        assert_eq!(parse_volume(Some(" 1.25 "), "volumen"), Ok(1.25));
        assert_eq!(
            parse_volume(Some("-1"), "volumen"),
            Err(ValidationError::InvalidVolume("volumen"))
        );
        assert_eq!(
            parse_volume(Some("abc"), "volumen"),
            Err(ValidationError::InvalidVolume("volumen"))
        );
        assert_eq!(
            parse_volume(Some("NaN"), "volumen"),
            Err(ValidationError::InvalidVolume("volumen"))
        );
        assert_eq!(
            parse_volume(None, "volumen"),
            Err(ValidationError::Missing("volumen"))
        );
    }

    #[test]
    fn test_overlong_phone_is_rejected() {
        let form = IntakeForm {
            customer_phone: Some("1".repeat(21)),
            ..complete_form()
        };
        assert_eq!(
            form.validate().err(),
            Some(ValidationError::TooLong {
                field: "telefono_cliente",
                max: 20
            })
        );
    }

    #[tokio::test]
    async fn test_create_intake_persists_one_record() {
        let repo = MemoryIntakeRepository::new();
        let pricing = PricingEngine::default();
        let service = IntakeService::new(&repo, &pricing);

        let first = service.create_intake(&complete_form()).await;
        let second = service.create_intake(&complete_form()).await;
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("intake should be stored");
        };

        assert!((first.volume_m3 - 2.0).abs() < f64::EPSILON);
        assert!(second.id > first.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_invalid_intake_persists_nothing() {
        let repo = MemoryIntakeRepository::new();
        let pricing = PricingEngine::default();
        let service = IntakeService::new(&repo, &pricing);
        let form = IntakeForm {
            customer_email: None,
            ..complete_form()
        };

        let result = service.create_intake(&form).await;
        assert!(matches!(
            result,
            Err(IntakeError::Validation(ValidationError::Missing("email_cliente")))
        ));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_submitted_quote_is_stored_as_given() {
        let repo = MemoryIntakeRepository::new();
        let pricing = PricingEngine::default();
        let service = IntakeService::new(&repo, &pricing);
        let form = IntakeForm {
            quoted_price: Some("1".to_string()),
            ..complete_form()
        };

        let record = service.create_intake(&form).await;
        assert!(matches!(record, Ok(ref r) if r.quoted_price == "1"));
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let repo = MemoryIntakeRepository::new();
        repo.set_failing(true);
        let pricing = PricingEngine::default();
        let service = IntakeService::new(&repo, &pricing);

        let result = service.create_intake(&complete_form()).await;
        assert!(matches!(result, Err(IntakeError::Storage(_))));
    }
}
