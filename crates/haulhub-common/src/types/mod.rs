//! Core data types for HaulHub pricing

pub mod quote;
pub mod tariff;
pub mod trip;
pub mod vehicle;
