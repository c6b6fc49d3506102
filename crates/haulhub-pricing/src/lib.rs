//! # HaulHub Pricing
//!
//! Regional price computation for HaulHub deliveries.
//!
//! ## Pricing Formula
//!
//! ```text
//! P = ⌈(B + D + W) × R × (1 - E) × 2⌉ / 2
//! ```
//!
//! Where:
//! - B: Region base rate (USD), covering the base distance/weight allowance
//! - D: Distance surcharge, one increment per started step beyond the allowance
//! - W: Weight surcharge, same tiering on weight
//! - R: Rush multiplier (1 when not rushed)
//! - E: Eco discount for bikes and e-scooters (0 otherwise)
//!
//! The stablecoin price equals `P`; the local price is `P × exchangeRate`.
//!
//! ## Usage
//!
//! ```
//! use haulhub_pricing::PricingEngine;
//! use rust_decimal::Decimal;
//!
//! let engine = PricingEngine::with_builtin_tariffs()?;
//! let quote = engine.compute_price("us", Decimal::from(7), Decimal::from(10), false, "car")?;
//! assert_eq!(quote.price_usd, Decimal::from(6));
//! # Ok::<(), haulhub_pricing::HaulHubError>(())
//! ```

pub mod pricing;
pub mod tariff;

pub use pricing::{
    format_crypto, format_distance, format_local, format_usd, format_weight, PricingEngine,
    QuoteSummary,
};
pub use tariff::{TariffTable, BUILTIN_TARIFFS};

pub use haulhub_common::{HaulHubError, PriceQuote, RegionTariff, Result, TripRequest};
