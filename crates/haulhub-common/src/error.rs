//! Error types for HaulHub pricing
//!
//! Provides a unified error type and domain-specific error variants

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Result type alias using HaulHubError
pub type Result<T> = std::result::Result<T, HaulHubError>;

/// Unified error type for HaulHub operations
#[derive(Debug, Error)]
pub enum HaulHubError {
    // Caller-supplied trip attributes
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    // Tariff table
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HaulHubError {
    /// True for errors the caller can fix by re-submitting different input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HaulHubError::InvalidInput(_))
    }
}

/// Trip attribute that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Distance,
    Weight,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Distance => "distance",
            InputField::Weight => "weight",
        }
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected trip attributes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} is required")]
    Missing { field: InputField },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: InputField, value: f64 },

    #[error("{field} must be a number, got {value}")]
    NotNumeric { field: InputField, value: String },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: InputField, value: Decimal },

    #[error("{field} is too large to price, got {value}")]
    OutOfRange { field: InputField, value: Decimal },
}

impl InvalidInputError {
    /// The field the error refers to
    pub fn field(&self) -> InputField {
        match self {
            InvalidInputError::Missing { field }
            | InvalidInputError::NotFinite { field, .. }
            | InvalidInputError::NotNumeric { field, .. }
            | InvalidInputError::NotPositive { field, .. }
            | InvalidInputError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Tariff table errors. Any of these prevents the engine from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Tariff for region '{region}' violates invariant: {reason}")]
    InvariantViolated { region: String, reason: String },

    #[error("Region '{0}' is defined more than once")]
    DuplicateRegion(String),

    #[error("Tariff entry has an empty region code")]
    EmptyRegionCode,

    #[error("Fallback region '{0}' is missing from the tariff table")]
    MissingFallbackRegion(String),

    #[error("Tariff table contains no regions")]
    EmptyTable,

    #[error("Failed to parse tariff table: {0}")]
    Parse(String),

    #[error("Failed to read tariff table: {0}")]
    Io(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for HaulHubError {
    fn from(err: serde_json::Error) -> Self {
        HaulHubError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for HaulHubError {
    fn from(err: std::io::Error) -> Self {
        HaulHubError::Configuration(ConfigurationError::Io(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = HaulHubError::InvalidInput(InvalidInputError::NotPositive {
            field: InputField::Weight,
            value: dec!(-2),
        });
        assert_eq!(
            err.to_string(),
            "Invalid input: weight must be greater than zero, got -2"
        );
    }

    #[test]
    fn test_invalid_input_field() {
        let err = InvalidInputError::NotFinite {
            field: InputField::Distance,
            value: f64::NAN,
        };
        assert_eq!(err.field(), InputField::Distance);
        assert_eq!(
            InvalidInputError::Missing {
                field: InputField::Weight
            }
            .field(),
            InputField::Weight
        );
    }

    #[test]
    fn test_out_of_range_names_field() {
        let err = InvalidInputError::OutOfRange {
            field: InputField::Distance,
            value: dec!(1e26),
        };
        assert_eq!(err.field(), InputField::Distance);
        assert!(err.to_string().starts_with("distance is too large"));

        let err = InvalidInputError::NotNumeric {
            field: InputField::Weight,
            value: "\"abc\"".to_string(),
        };
        assert_eq!(err.to_string(), "weight must be a number, got \"abc\"");
    }

    #[test]
    fn test_recoverable() {
        let input: HaulHubError = InvalidInputError::Missing {
            field: InputField::Distance,
        }
        .into();
        let config: HaulHubError = ConfigurationError::EmptyTable.into();
        assert!(input.is_recoverable());
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_configuration_error() {
        let err = ConfigurationError::InvariantViolated {
            region: "ph".to_string(),
            reason: "base_rate must be > 0".to_string(),
        };
        assert!(err.to_string().contains("'ph'"));
    }
}
