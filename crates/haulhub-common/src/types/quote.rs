//! Price quotes
//!
//! A [`PriceQuote`] is the full breakdown of one pricing calculation. It has
//! no identity and is never mutated; callers that need to track a quote (a
//! job record, an escrow deposit) wrap or copy the fields they need.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured output of one pricing calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Region whose tariff was applied (`us` after a fallback)
    pub region_code: String,

    /// Base rate in USD, before multipliers
    pub base_rate: Decimal,

    /// Tiered distance surcharge in USD, before multipliers
    pub distance_charge: Decimal,

    /// Tiered weight surcharge in USD, before multipliers
    pub weight_charge: Decimal,

    /// Rush factor used (1 when not rushed)
    pub rush_multiplier: Decimal,

    /// Eco discount used (0 for standard vehicles)
    pub eco_discount_applied: Decimal,

    /// Final USD price, rounded up to the next 0.50
    pub price_usd: Decimal,

    /// Stablecoin amount, pegged 1:1 to USD
    pub crypto_price: Decimal,

    /// `price_usd` converted at the region's exchange rate
    pub local_currency_price: Decimal,

    pub currency_code: String,
    pub currency_symbol: String,
    pub distance_unit: String,
    pub weight_unit: String,
}

impl PriceQuote {
    /// Pre-multiplier subtotal in USD
    pub fn subtotal_usd(&self) -> Decimal {
        self.base_rate + self.distance_charge + self.weight_charge
    }

    pub fn is_rush(&self) -> bool {
        self.rush_multiplier > Decimal::ONE
    }

    pub fn is_eco(&self) -> bool {
        self.eco_discount_applied > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_quote() -> PriceQuote {
        PriceQuote {
            region_code: "ph".to_string(),
            base_rate: dec!(2.00),
            distance_charge: dec!(0.30),
            weight_charge: dec!(0.20),
            rush_multiplier: dec!(1.3),
            eco_discount_applied: dec!(0.10),
            price_usd: dec!(3.00),
            crypto_price: dec!(3.00),
            local_currency_price: dec!(169.50),
            currency_code: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            distance_unit: "km".to_string(),
            weight_unit: "kg".to_string(),
        }
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(sample_quote().subtotal_usd(), dec!(2.50));
    }

    #[test]
    fn test_flags() {
        let mut q = sample_quote();
        assert!(q.is_rush());
        assert!(q.is_eco());

        q.rush_multiplier = Decimal::ONE;
        q.eco_discount_applied = Decimal::ZERO;
        assert!(!q.is_rush());
        assert!(!q.is_eco());
    }

    #[test]
    fn test_camel_case_json() {
        let value = serde_json::to_value(sample_quote()).unwrap();
        assert_eq!(value["priceUsd"], "3.00");
        assert_eq!(value["localCurrencyPrice"], "169.50");
        assert_eq!(value["ecoDiscountApplied"], "0.10");
        assert!(value.get("price_usd").is_none());
    }
}
