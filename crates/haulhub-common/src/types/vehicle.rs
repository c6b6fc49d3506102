//! Vehicle classification
//!
//! Vehicle types arrive as free-form strings from forms and job records.
//! Only a small set of human- or electric-powered vehicles earns the eco
//! discount; anything unrecognised is priced as a standard vehicle.

use serde::{Deserialize, Serialize};

/// Vehicle types eligible for the eco discount, lowercase
pub const ECO_VEHICLES: [&str; 4] = ["bike", "escooter", "bicycle", "ebike"];

/// Pricing class of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Bike, bicycle, e-bike, e-scooter
    Eco,
    /// Everything else
    Standard,
}

impl VehicleClass {
    /// Classify a free-form vehicle type (ASCII case-insensitive)
    pub fn classify(vehicle_type: &str) -> Self {
        if ECO_VEHICLES
            .iter()
            .any(|eco| eco.eq_ignore_ascii_case(vehicle_type))
        {
            VehicleClass::Eco
        } else {
            VehicleClass::Standard
        }
    }

    pub fn is_eco(&self) -> bool {
        matches!(self, VehicleClass::Eco)
    }
}

impl Default for VehicleClass {
    fn default() -> Self {
        VehicleClass::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eco_vehicles() {
        for v in ["bike", "BIKE", "Bicycle", "eScooter", "ebike"] {
            assert_eq!(VehicleClass::classify(v), VehicleClass::Eco, "{}", v);
        }
    }

    #[test]
    fn test_standard_vehicles() {
        for v in ["car", "van", "truck", "", "e-scooter", " bike", "motorbike"] {
            assert_eq!(VehicleClass::classify(v), VehicleClass::Standard, "{}", v);
        }
        assert!(!VehicleClass::default().is_eco());
    }
}
