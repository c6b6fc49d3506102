//! # HaulHub Common
//!
//! Shared types and errors for HaulHub regional pricing.
//!
//! ## Core Types
//!
//! - [`RegionTariff`]: per-region pricing parameters
//! - [`TripRequest`]: trip attributes submitted for a quote
//! - [`PriceQuote`]: USD, local-currency and stablecoin price breakdown
//! - [`VehicleClass`]: eco vs standard vehicle classification
//!
//! ## Errors
//!
//! - [`InvalidInputError`]: bad distance or weight, recoverable by the caller
//! - [`ConfigurationError`]: broken tariff table, fatal at load

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ConfigurationError, HaulHubError, InputField, InvalidInputError, Result};
pub use types::{
    quote::PriceQuote,
    tariff::{RegionTariff, UnitSystem},
    trip::{measure_from_f64, measure_from_json, TripRequest, MAX_MEASURE},
    vehicle::{VehicleClass, ECO_VEHICLES},
};

/// HaulHub version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Region used when a region code is unknown or missing
pub const FALLBACK_REGION: &str = "us";

/// Label of the USD-pegged stablecoin used for escrow funding
pub const STABLECOIN_SYMBOL: &str = "USDC";
