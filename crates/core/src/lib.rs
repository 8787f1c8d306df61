//! Deposit Core - Shared types library.
//!
//! This crate provides the types shared by every component of the storage
//! deposit service:
//! - `web` - Quote calculator, intake form and admin record listing
//! - `cli` - Command-line tools for migrations and admin bootstrap
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`pricing`] - Volume based pricing and box recommendation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod types;

pub use pricing::{BoxSize, BoxTier, PricingEngine, Quote, compute_price, recommend_box};
pub use types::*;
