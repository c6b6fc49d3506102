//! Regional pricing engine
//!
//! The single implementation of the delivery price formula:
//!
//! ```text
//! subtotal = baseRate + tier(distance) + tier(weight)
//! price    = roundUpToHalf(subtotal × rush × (1 - eco))
//! local    = price × exchangeRate
//! ```
//!
//! Rush is applied before the eco discount and the result is rounded *up*
//! to the next 0.50 USD; the step order is part of the tariff rules. All
//! arithmetic is checked, and an overflow is reported as out-of-range input.

use haulhub_common::{
    HaulHubError, InputField, InvalidInputError, PriceQuote, RegionTariff, Result, TripRequest,
    VehicleClass, MAX_MEASURE,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::tariff::TariffTable;

const TWO: Decimal = Decimal::TWO;

/// Stateless pricing engine over a validated tariff table
#[derive(Debug, Clone)]
pub struct PricingEngine {
    tariffs: TariffTable,
}

impl PricingEngine {
    pub fn new(tariffs: TariffTable) -> Self {
        Self { tariffs }
    }

    /// Engine over the tariff file shipped with the crate
    pub fn with_builtin_tariffs() -> Result<Self> {
        Ok(Self::new(TariffTable::builtin()?))
    }

    pub fn tariffs(&self) -> &TariffTable {
        &self.tariffs
    }

    /// Tariff for a region code, falling back to `us`
    pub fn get_tariff(&self, region_code: &str) -> &RegionTariff {
        self.tariffs.get_tariff(region_code)
    }

    /// Price a trip described by a [`TripRequest`]
    pub fn quote(&self, request: &TripRequest) -> Result<PriceQuote> {
        self.compute_price(
            &request.region,
            request.distance,
            request.weight,
            request.is_rush,
            &request.vehicle_type,
        )
    }

    /// Compute the price breakdown for one trip.
    ///
    /// Fails when `distance` or `weight` is not strictly positive, exceeds
    /// [`MAX_MEASURE`], or produces an amount too large to represent.
    #[instrument(level = "debug", skip(self))]
    pub fn compute_price(
        &self,
        region: &str,
        distance: Decimal,
        weight: Decimal,
        is_rush: bool,
        vehicle_type: &str,
    ) -> Result<PriceQuote> {
        let distance = require_measure(InputField::Distance, distance)?;
        let weight = require_measure(InputField::Weight, weight)?;

        let tariff = self.tariffs.get_tariff(region);

        let base_rate = tariff.base_rate;
        let distance_charge = tiered_charge(
            distance,
            tariff.base_distance,
            tariff.distance_step,
            tariff.distance_increment,
        )
        .ok_or_else(|| out_of_range(InputField::Distance, distance))?;
        let weight_charge = tiered_charge(
            weight,
            tariff.base_weight,
            tariff.weight_step,
            tariff.weight_increment,
        )
        .ok_or_else(|| out_of_range(InputField::Weight, weight))?;

        // Later overflows are charged to the measurement driving the price
        let (field, value) = if distance_charge >= weight_charge {
            (InputField::Distance, distance)
        } else {
            (InputField::Weight, weight)
        };
        let overflow = || out_of_range(field, value);

        let mut price = base_rate
            .checked_add(distance_charge)
            .and_then(|p| p.checked_add(weight_charge))
            .ok_or_else(overflow)?;

        let rush_multiplier = if is_rush {
            tariff.rush_multiplier
        } else {
            Decimal::ONE
        };
        price = price.checked_mul(rush_multiplier).ok_or_else(overflow)?;

        let eco_discount_applied = if VehicleClass::classify(vehicle_type).is_eco() {
            tariff.eco_discount
        } else {
            Decimal::ZERO
        };
        price = price
            .checked_mul(Decimal::ONE - eco_discount_applied)
            .ok_or_else(overflow)?;

        let price_usd = round_up_to_half(price).ok_or_else(overflow)?;
        let local_currency_price = price_usd
            .checked_mul(tariff.exchange_rate)
            .ok_or_else(overflow)?;

        debug!(
            region = %tariff.region_code,
            %price_usd,
            %local_currency_price,
            currency = %tariff.currency_code,
            "Price computed"
        );

        Ok(PriceQuote {
            region_code: tariff.region_code.clone(),
            base_rate,
            distance_charge,
            weight_charge,
            rush_multiplier,
            eco_discount_applied,
            price_usd,
            crypto_price: price_usd,
            local_currency_price,
            currency_code: tariff.currency_code.clone(),
            currency_symbol: tariff.currency_symbol.clone(),
            distance_unit: tariff.distance_unit().to_string(),
            weight_unit: tariff.weight_unit().to_string(),
        })
    }
}

fn require_measure(field: InputField, value: Decimal) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(HaulHubError::InvalidInput(InvalidInputError::NotPositive {
            field,
            value,
        }));
    }
    if value > MAX_MEASURE {
        return Err(out_of_range(field, value));
    }
    Ok(value)
}

fn out_of_range(field: InputField, value: Decimal) -> HaulHubError {
    HaulHubError::InvalidInput(InvalidInputError::OutOfRange { field, value })
}

/// Charge for the part of `amount` beyond `allowance`.
///
/// Every started `step` bills a full `increment`: 0.1 over a step boundary
/// costs the same as a whole step. Returns `None` on overflow.
pub fn tiered_charge(
    amount: Decimal,
    allowance: Decimal,
    step: Decimal,
    increment: Decimal,
) -> Option<Decimal> {
    if amount <= allowance {
        return Some(Decimal::ZERO);
    }
    amount
        .checked_sub(allowance)?
        .checked_div(step)?
        .ceil()
        .checked_mul(increment)
}

/// Round up to the next multiple of 0.50. Returns `None` on overflow.
pub fn round_up_to_half(price: Decimal) -> Option<Decimal> {
    price.checked_mul(TWO).map(|doubled| doubled.ceil() / TWO)
}
