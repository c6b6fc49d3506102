//! Tariff module
//!
//! Loading, validation and lookup of per-region pricing parameters.

pub mod table;

pub use table::{TariffTable, BUILTIN_TARIFFS};
