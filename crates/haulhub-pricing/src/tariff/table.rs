//! Region tariff table
//!
//! Holds one validated [`RegionTariff`] per region and resolves region codes
//! with a fallback to [`FALLBACK_REGION`]. A table is validated once when it
//! is built and is read-only afterwards, so it can be shared across threads
//! without synchronisation.

use std::collections::HashMap;
use std::path::Path;

use haulhub_common::{ConfigurationError, RegionTariff, Result, FALLBACK_REGION};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tariff file shipped with the engine
pub const BUILTIN_TARIFFS: &str = include_str!("../../tariffs/regions.json");

/// On-disk layout of a tariff file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TariffFile {
    version: String,
    regions: Vec<RegionTariff>,
}

/// Validated, immutable set of region tariffs
#[derive(Debug, Clone)]
pub struct TariffTable {
    version: String,
    tariffs: HashMap<String, RegionTariff>,
    fallback: RegionTariff,
}

impl TariffTable {
    /// Build a table, validating every entry
    pub fn new(version: impl Into<String>, regions: Vec<RegionTariff>) -> Result<Self> {
        if regions.is_empty() {
            return Err(ConfigurationError::EmptyTable.into());
        }

        let mut tariffs = HashMap::with_capacity(regions.len());
        for tariff in regions {
            tariff.validate()?;
            if tariffs.contains_key(&tariff.region_code) {
                return Err(ConfigurationError::DuplicateRegion(tariff.region_code).into());
            }
            tariffs.insert(tariff.region_code.clone(), tariff);
        }

        let fallback = tariffs
            .get(FALLBACK_REGION)
            .cloned()
            .ok_or_else(|| ConfigurationError::MissingFallbackRegion(FALLBACK_REGION.to_string()))?;

        let table = Self {
            version: version.into(),
            tariffs,
            fallback,
        };

        info!(
            version = %table.version,
            regions = table.tariffs.len(),
            "Tariff table loaded"
        );
        Ok(table)
    }

    /// Load the tariff file shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TARIFFS)
    }

    /// Load a tariff table from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TariffFile = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        Self::new(file.version, file.regions)
    }

    /// Load a tariff table from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Resolve a region code. Unknown or empty codes resolve to the fallback.
    pub fn get_tariff(&self, region_code: &str) -> &RegionTariff {
        match self.tariffs.get(region_code) {
            Some(tariff) => tariff,
            None => {
                debug!(
                    region = region_code,
                    fallback = FALLBACK_REGION,
                    "Unknown region, using fallback tariff"
                );
                &self.fallback
            }
        }
    }

    pub fn contains(&self, region_code: &str) -> bool {
        self.tariffs.contains_key(region_code)
    }

    /// All tariffs, sorted by region code
    pub fn regions(&self) -> Vec<&RegionTariff> {
        let mut regions: Vec<_> = self.tariffs.values().collect();
        regions.sort_by(|a, b| a.region_code.cmp(&b.region_code));
        regions
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.tariffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }
}
