//! Pricing module
//!
//! Provides the regional price calculation with:
//! - Tiered distance and weight surcharges
//! - Rush premiums and eco-vehicle discounts
//! - Rounding up to clean 0.50 USD price points
//! - Local-currency and stablecoin conversion

pub mod engine;
pub mod format;

pub use engine::{round_up_to_half, tiered_charge, PricingEngine};
pub use format::{
    format_crypto, format_distance, format_local, format_usd, format_weight, QuoteSummary,
};
