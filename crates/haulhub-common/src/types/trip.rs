//! Trip attributes submitted for pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InputField, InvalidInputError};
use crate::types::vehicle::VehicleClass;

/// Largest distance or weight accepted for pricing, in region units
pub const MAX_MEASURE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Request for a price quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Region code; unknown codes price as `us`
    #[serde(default)]
    pub region: String,

    /// Trip distance in the region's distance unit
    pub distance: Decimal,

    /// Item weight in the region's weight unit
    pub weight: Decimal,

    /// Premium delivery priority
    #[serde(default)]
    pub is_rush: bool,

    /// Free-form vehicle type (e.g. "car", "bike")
    #[serde(default)]
    pub vehicle_type: String,
}

impl TripRequest {
    /// Create a non-rush request with no vehicle type
    pub fn new(region: impl Into<String>, distance: Decimal, weight: Decimal) -> Self {
        Self {
            region: region.into(),
            distance,
            weight,
            is_rush: false,
            vehicle_type: String::new(),
        }
    }

    /// Set the rush flag
    pub fn with_rush(mut self, is_rush: bool) -> Self {
        self.is_rush = is_rush;
        self
    }

    /// Set the vehicle type
    pub fn with_vehicle(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = vehicle_type.into();
        self
    }

    pub fn vehicle_class(&self) -> VehicleClass {
        VehicleClass::classify(&self.vehicle_type)
    }
}

/// Convert a wire or form number into a measurement.
///
/// Missing values and NaN/infinite values are rejected here; the sign check
/// happens in the engine so that every entry point shares it.
pub fn measure_from_f64(
    field: InputField,
    value: Option<f64>,
) -> Result<Decimal, InvalidInputError> {
    let value = value.ok_or(InvalidInputError::Missing { field })?;
    if !value.is_finite() {
        return Err(InvalidInputError::NotFinite { field, value });
    }
    Decimal::try_from(value).map_err(|_| InvalidInputError::NotFinite { field, value })
}

/// Convert a loosely typed JSON or query-string value into a measurement.
///
/// Numbers and numeric strings are accepted; `null` counts as missing and
/// anything else is reported as not numeric.
pub fn measure_from_json(
    field: InputField,
    value: Option<&Value>,
) -> Result<Decimal, InvalidInputError> {
    let number = match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let parsed = s.trim().parse::<f64>().map_err(|_| InvalidInputError::NotNumeric {
                field,
                value: s.clone(),
            })?;
            Some(parsed)
        }
        Some(other) => {
            return Err(InvalidInputError::NotNumeric {
                field,
                value: other.to_string(),
            })
        }
    };
    measure_from_f64(field, number)
}
