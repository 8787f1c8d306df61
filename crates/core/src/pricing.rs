//! Volume based pricing and box recommendation.
//!
//! Both operations are total: every `f64` maps to a price and a box size.
//! Volumes are cubic meters.
//!
//! ```
//! use deposit_core::{BoxSize, compute_price, recommend_box};
//!
//! assert_eq!(compute_price(2.0), 17_000);
//! assert_eq!(recommend_box(2.0), BoxSize::Large);
//! assert_eq!(recommend_box(2.0).label(), "large box");
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price};

/// Flat fee charged for any non-empty deposit.
pub const DEFAULT_BASE_PRICE: i64 = 5000;

/// Price per cubic meter.
pub const DEFAULT_UNIT_RATE: i64 = 6000;

/// Reference box tiers, smallest first. Volumes above the last bound get
/// [`BoxSize::SpecialContainer`].
pub const DEFAULT_TIERS: &[BoxTier] = &[
    BoxTier::new(0.5, BoxSize::Small),
    BoxTier::new(1.5, BoxSize::Medium),
    BoxTier::new(3.0, BoxSize::Large),
];

/// Recommended container for a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxSize {
    #[serde(rename = "small box")]
    Small,
    #[serde(rename = "medium box")]
    Medium,
    #[serde(rename = "large box")]
    Large,
    #[serde(rename = "special container")]
    SpecialContainer,
}

impl BoxSize {
    /// Human readable label, also the value stored on intake records.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Small => "small box",
            Self::Medium => "medium box",
            Self::Large => "large box",
            Self::SpecialContainer => "special container",
        }
    }
}

impl fmt::Display for BoxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BoxSize {
    type Err = UnknownBoxSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "small box" => Ok(Self::Small),
            "medium box" => Ok(Self::Medium),
            "large box" => Ok(Self::Large),
            "special container" => Ok(Self::SpecialContainer),
            other => Err(UnknownBoxSize(other.to_owned())),
        }
    }
}

/// Returned when a label does not name a known box size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown box size: {0}")]
pub struct UnknownBoxSize(pub String);

/// One step of the box lookup table: volumes up to and including
/// `upper_bound` fit in `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxTier {
    pub upper_bound: f64,
    pub size: BoxSize,
}

impl BoxTier {
    #[must_use]
    pub const fn new(upper_bound: f64, size: BoxSize) -> Self {
        Self { upper_bound, size }
    }
}

/// Result of quoting a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub price: Price,
    pub box_size: BoxSize,
}

/// Pricing parameters for a deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEngine {
    base_price: i64,
    unit_rate: i64,
    currency: CurrencyCode,
    tiers: Vec<BoxTier>,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            unit_rate: DEFAULT_UNIT_RATE,
            currency: CurrencyCode::default(),
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

impl PricingEngine {
    /// Create an engine with custom rates and the reference box tiers.
    #[must_use]
    pub fn new(base_price: i64, unit_rate: i64, currency: CurrencyCode) -> Self {
        Self {
            base_price,
            unit_rate,
            currency,
            tiers: DEFAULT_TIERS.to_vec(),
        }
    }

    /// Replace the box tiers. Tiers are sorted by upper bound.
    #[must_use]
    pub fn with_tiers(mut self, mut tiers: Vec<BoxTier>) -> Self {
        tiers.sort_by(|a, b| a.upper_bound.total_cmp(&b.upper_bound));
        self.tiers = tiers;
        self
    }

    #[must_use]
    pub const fn base_price(&self) -> i64 {
        self.base_price
    }

    #[must_use]
    pub const fn unit_rate(&self) -> i64 {
        self.unit_rate
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Price for a volume in whole currency units.
    #[must_use]
    pub fn compute_price(&self, volume_m3: f64) -> i64 {
        price_for(self.base_price, self.unit_rate, volume_m3)
    }

    /// Box recommended for a volume.
    #[must_use]
    pub fn recommend_box(&self, volume_m3: f64) -> BoxSize {
        box_for(&self.tiers, volume_m3)
    }

    /// Price and box for a volume.
    #[must_use]
    pub fn quote(&self, volume_m3: f64) -> Quote {
        Quote {
            price: Price::new(self.compute_price(volume_m3), self.currency),
            box_size: self.recommend_box(volume_m3),
        }
    }
}

/// Price for a volume using the reference rates.
///
/// Returns 0 for volumes that are not strictly positive (including NaN),
/// otherwise `floor(5000 + volume * 6000)`.
#[must_use]
pub fn compute_price(volume_m3: f64) -> i64 {
    price_for(DEFAULT_BASE_PRICE, DEFAULT_UNIT_RATE, volume_m3)
}

/// Box recommended for a volume using the reference tiers.
///
/// Non-finite volumes are priced at 0 and therefore get the smallest box,
/// the same as an empty deposit.
#[must_use]
pub fn recommend_box(volume_m3: f64) -> BoxSize {
    box_for(DEFAULT_TIERS, volume_m3)
}

#[allow(clippy::cast_precision_loss)] // Rates are small configuration constants
#[allow(clippy::cast_possible_truncation)] // Saturating float to int cast is intended
#[allow(clippy::suboptimal_flops)] // Unfused arithmetic keeps quotes identical to the published formula
fn price_for(base_price: i64, unit_rate: i64, volume_m3: f64) -> i64 {
    if !volume_m3.is_finite() || volume_m3 <= 0.0 {
        return 0;
    }
    (base_price as f64 + volume_m3 * unit_rate as f64).floor() as i64
}

fn box_for(tiers: &[BoxTier], volume_m3: f64) -> BoxSize {
    let volume_m3 = if volume_m3.is_finite() { volume_m3 } else { 0.0 };
    tiers
        .iter()
        .find(|tier| volume_m3 <= tier.upper_bound)
        .map_or(BoxSize::SpecialContainer, |tier| tier.size)
}
