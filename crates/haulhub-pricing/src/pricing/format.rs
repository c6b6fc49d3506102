//! Display formatting for prices and measurements

use haulhub_common::{PriceQuote, RegionTariff, STABLECOIN_SYMBOL};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Format a local-currency amount with the region's symbol and minor units
pub fn format_local(amount: Decimal, tariff: &RegionTariff) -> String {
    format!(
        "{}{}",
        tariff.currency_symbol,
        group_thousands(amount, tariff.currency_decimals)
    )
}

pub fn format_usd(amount: Decimal) -> String {
    format!("${}", group_thousands(amount, 2))
}

/// Stablecoin amount, e.g. `6.00 USDC`
pub fn format_crypto(amount: Decimal) -> String {
    format!("{} {}", group_thousands(amount, 2), STABLECOIN_SYMBOL)
}

pub fn format_distance(value: Decimal, tariff: &RegionTariff) -> String {
    format!("{} {}", value.normalize(), tariff.distance_unit())
}

pub fn format_weight(value: Decimal, tariff: &RegionTariff) -> String {
    format!("{} {}", value.normalize(), tariff.weight_unit())
}

/// Round half away from zero to `decimals` places and insert `,` separators
fn group_thousands(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Pre-formatted strings for rendering a quote breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub base_rate: String,
    pub distance_charge: String,
    pub weight_charge: String,
    pub price_usd: String,
    pub local_price: String,
    pub crypto_price: String,
}

impl QuoteSummary {
    /// `tariff` supplies the minor units of the local currency
    pub fn new(quote: &PriceQuote, tariff: &RegionTariff) -> Self {
        Self {
            base_rate: format_usd(quote.base_rate),
            distance_charge: format_usd(quote.distance_charge),
            weight_charge: format_usd(quote.weight_charge),
            price_usd: format_usd(quote.price_usd),
            local_price: format_local(quote.local_currency_price, tariff),
            crypto_price: format_crypto(quote.crypto_price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEngine;
    use rust_decimal_macros::dec;

    fn engine() -> PricingEngine {
        PricingEngine::with_builtin_tariffs().unwrap()
    }

    #[test]
    fn test_format_local() {
        let engine = engine();
        assert_eq!(format_local(dec!(141.25), engine.get_tariff("ph")), "₱141.25");
        assert_eq!(format_local(dec!(38750), engine.get_tariff("id")), "Rp38,750");
        assert_eq!(format_local(dec!(36750.4), engine.get_tariff("vn")), "₫36,750");
        assert_eq!(format_local(dec!(2.3), engine.get_tariff("eu")), "€2.30");
    }

    #[test]
    fn test_format_usd_and_crypto() {
        assert_eq!(format_usd(dec!(6)), "$6.00");
        assert_eq!(format_usd(dec!(1234567.5)), "$1,234,567.50");
        assert_eq!(format_crypto(dec!(2.5)), "2.50 USDC");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(group_thousands(dec!(0.125), 2), "0.13");
        assert_eq!(group_thousands(dec!(-0.125), 2), "-0.13");
        assert_eq!(group_thousands(dec!(999.5), 0), "1,000");
        assert_eq!(group_thousands(dec!(-0.001), 2), "0.00");
    }

    #[test]
    fn test_format_measurements() {
        let engine = engine();
        assert_eq!(format_distance(dec!(7.0), engine.get_tariff("us")), "7 mi");
        assert_eq!(format_weight(dec!(12.50), engine.get_tariff("ph")), "12.5 kg");
        assert_eq!(format_weight(dec!(20), engine.get_tariff("uk")), "20 lbs");
    }

    #[test]
    fn test_quote_summary() {
        let engine = engine();
        let quote = engine
            .compute_price("ph", dec!(3), dec!(5), true, "bike")
            .unwrap();
        let summary = QuoteSummary::new(&quote, engine.get_tariff(&quote.region_code));

        assert_eq!(summary.base_rate, "$2.00");
        assert_eq!(summary.distance_charge, "$0.00");
        assert_eq!(summary.price_usd, "$2.50");
        assert_eq!(summary.local_price, "₱141.25");
        assert_eq!(summary.crypto_price, "2.50 USDC");
    }
}
