//! Whole-unit price representation.
//!
//! Deposit quotes are always whole currency units (the reference deployment
//! quotes in Argentine pesos), so the amount is an `i64` rather than a
//! decimal.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in whole currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(0, currency_code)
    }

    /// The bare amount as it is stored on intake records (e.g. `"17000"`).
    #[must_use]
    pub fn amount_string(&self) -> String {
        self.amount.to_string()
    }
}

impl fmt::Display for Price {
    /// Formats as `"$17000 ARS"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.currency_code.symbol(),
            self.amount,
            self.currency_code.code()
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used when rendering prices.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::ARS | Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARS" => Ok(Self::ARS),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

/// Returned when parsing an unsupported currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);
