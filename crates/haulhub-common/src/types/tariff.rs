//! Region tariffs
//!
//! One [`RegionTariff`] holds every pricing parameter for a market: the base
//! allowance, the tiered surcharges beyond it, the rush and eco factors, and
//! the currency and unit metadata used for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Measurement system of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilometres and kilograms
    Metric,
    /// Miles and pounds
    Imperial,
}

impl UnitSystem {
    const KM_PER_MILE: Decimal = Decimal::from_parts(1_609_344, 0, 0, false, 6);
    const KG_PER_POUND: Decimal = Decimal::from_parts(45_359_237, 0, 0, false, 8);

    pub fn from_imperial_flag(uses_imperial: bool) -> Self {
        if uses_imperial {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }

    pub fn distance_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lbs",
        }
    }

    /// Convert a distance in kilometres into this system's distance unit
    pub fn convert_distance_from_km(&self, km: Decimal) -> Decimal {
        match self {
            UnitSystem::Metric => km,
            UnitSystem::Imperial => km / Self::KM_PER_MILE,
        }
    }

    /// Convert a weight in kilograms into this system's weight unit
    pub fn convert_weight_from_kg(&self, kg: Decimal) -> Decimal {
        match self {
            UnitSystem::Metric => kg,
            UnitSystem::Imperial => kg / Self::KG_PER_POUND,
        }
    }
}

fn default_currency_decimals() -> u32 {
    2
}

/// Pricing parameters for one region
///
/// All monetary amounts are USD. Distances and weights are in the region's
/// own units (see [`RegionTariff::units`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionTariff {
    /// Short identifier, unique within a table (e.g. `us`, `ph`)
    pub region_code: String,
    /// Display name of the market
    pub region_name: String,
    /// ISO 4217 code of the local currency
    pub currency_code: String,
    pub currency_symbol: String,
    /// Minor-unit digits shown for local amounts
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u32,
    /// USD price covering the base allowance
    pub base_rate: Decimal,
    /// Distance included in the base rate
    pub base_distance: Decimal,
    /// Weight included in the base rate
    pub base_weight: Decimal,
    /// USD charged per distance step beyond the allowance
    pub distance_increment: Decimal,
    /// USD charged per weight step beyond the allowance
    pub weight_increment: Decimal,
    pub distance_step: Decimal,
    pub weight_step: Decimal,
    pub rush_multiplier: Decimal,
    /// Fraction taken off for eco vehicles (0.10 = 10%)
    pub eco_discount: Decimal,
    pub uses_imperial: bool,
    /// USD to local currency
    pub exchange_rate: Decimal,
}

impl RegionTariff {
    pub fn units(&self) -> UnitSystem {
        UnitSystem::from_imperial_flag(self.uses_imperial)
    }

    pub fn distance_unit(&self) -> &'static str {
        self.units().distance_unit()
    }

    pub fn weight_unit(&self) -> &'static str {
        self.units().weight_unit()
    }

    /// Check the record against the tariff invariants
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.region_code.trim().is_empty() {
            return Err(ConfigurationError::EmptyRegionCode);
        }

        let violated = |reason: &str| ConfigurationError::InvariantViolated {
            region: self.region_code.clone(),
            reason: reason.to_string(),
        };

        if self.base_rate <= Decimal::ZERO {
            return Err(violated("baseRate must be > 0"));
        }
        if self.eco_discount < Decimal::ZERO || self.eco_discount >= Decimal::ONE {
            return Err(violated("ecoDiscount must be in [0, 1)"));
        }
        if self.rush_multiplier < Decimal::ONE {
            return Err(violated("rushMultiplier must be >= 1"));
        }
        if self.exchange_rate <= Decimal::ZERO {
            return Err(violated("exchangeRate must be > 0"));
        }
        if self.distance_step <= Decimal::ZERO {
            return Err(violated("distanceStep must be > 0"));
        }
        if self.weight_step <= Decimal::ZERO {
            return Err(violated("weightStep must be > 0"));
        }
        if self.base_distance < Decimal::ZERO || self.base_weight < Decimal::ZERO {
            return Err(violated("base allowances must be >= 0"));
        }
        if self.distance_increment < Decimal::ZERO || self.weight_increment < Decimal::ZERO {
            return Err(violated("increments must be >= 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_tariff() -> RegionTariff {
        RegionTariff {
            region_code: "us".to_string(),
            region_name: "United States".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            base_rate: dec!(5.00),
            base_distance: dec!(5),
            base_weight: dec!(10),
            distance_increment: dec!(1.00),
            weight_increment: dec!(0.50),
            distance_step: dec!(2),
            weight_step: dec!(10),
            rush_multiplier: dec!(1.5),
            eco_discount: dec!(0.10),
            uses_imperial: true,
            exchange_rate: dec!(1.00),
        }
    }

    #[test]
    fn test_valid_tariff() {
        assert!(sample_tariff().validate().is_ok());
    }

    #[test]
    fn test_units() {
        let mut t = sample_tariff();
        assert_eq!(t.distance_unit(), "mi");
        assert_eq!(t.weight_unit(), "lbs");

        t.uses_imperial = false;
        assert_eq!(t.units(), UnitSystem::Metric);
        assert_eq!(t.distance_unit(), "km");
        assert_eq!(t.weight_unit(), "kg");
    }

    #[test]
    fn test_invariants_rejected() {
        let cases: [fn(&mut RegionTariff); 9] = [
            |t| t.base_rate = Decimal::ZERO,
            |t| t.eco_discount = Decimal::ONE,
            |t| t.eco_discount = dec!(-0.1),
            |t| t.rush_multiplier = dec!(0.9),
            |t| t.exchange_rate = Decimal::ZERO,
            |t| t.distance_step = Decimal::ZERO,
            |t| t.weight_step = dec!(-5),
            |t| t.base_weight = dec!(-1),
            |t| t.weight_increment = dec!(-0.5),
        ];

        for mutate in cases {
            let mut t = sample_tariff();
            mutate(&mut t);
            match t.validate() {
                Err(ConfigurationError::InvariantViolated { region, .. }) => {
                    assert_eq!(region, "us")
                }
                other => panic!("expected invariant violation, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut t = sample_tariff();
        t.rush_multiplier = Decimal::ONE;
        t.eco_discount = Decimal::ZERO;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_empty_region_code() {
        let mut t = sample_tariff();
        t.region_code = "  ".to_string();
        assert_eq!(t.validate(), Err(ConfigurationError::EmptyRegionCode));
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(
            UnitSystem::Metric.convert_distance_from_km(dec!(12.5)),
            dec!(12.5)
        );
        assert_eq!(
            UnitSystem::Imperial.convert_distance_from_km(dec!(1.609344)),
            dec!(1)
        );
        assert_eq!(
            UnitSystem::Imperial.convert_weight_from_kg(dec!(0.45359237)),
            dec!(1)
        );
    }

    #[test]
    fn test_deserialize_defaults_currency_decimals() {
        let json = r#"{
            "regionCode": "eu",
            "regionName": "Eurozone",
            "currencyCode": "EUR",
            "currencySymbol": "€",
            "baseRate": "4.00",
            "baseDistance": "5",
            "baseWeight": "5",
            "distanceIncrement": "0.80",
            "weightIncrement": "0.40",
            "distanceStep": "2",
            "weightStep": "5",
            "rushMultiplier": "1.4",
            "ecoDiscount": "0.15",
            "usesImperial": false,
            "exchangeRate": "0.92"
        }"#;
        let t: RegionTariff = serde_json::from_str(json).unwrap();
        assert_eq!(t.currency_decimals, 2);
        assert_eq!(t.base_rate, dec!(4.00));
        assert!(t.validate().is_ok());
    }
}
