//! Gateway configuration

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Gateway settings
///
/// Read from `HAULHUB__*` environment variables (after loading `.env`), e.g.
/// `HAULHUB__PORT=9090` or `HAULHUB__TARIFFS_PATH=/etc/haulhub/regions.json`.
/// A bare `PORT` variable takes priority over `HAULHUB__PORT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Alternative tariff file; the shipped table is used when unset
    #[serde(default)]
    pub tariffs_path: Option<PathBuf>,
    /// How long a quote is advertised as valid
    pub quote_validity_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            tariffs_path: None,
            quote_validity_secs: 300,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let builder = Self::defaults()?.add_source(
            ::config::Environment::with_prefix("HAULHUB")
                .separator("__")
                .try_parsing(true),
        );
        let mut cfg: Self = builder.build()?.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        cfg.quote_validity()?;
        Ok(cfg)
    }

    /// Quote validity window, rejected when chrono cannot represent it
    pub fn quote_validity(&self) -> Result<chrono::Duration> {
        let secs = i64::try_from(self.quote_validity_secs)
            .context("quote_validity_secs does not fit in i64")?;
        chrono::Duration::try_seconds(secs)
            .ok_or_else(|| anyhow!("quote_validity_secs out of range: {}", secs))
    }

    fn defaults() -> Result<::config::ConfigBuilder<::config::builder::DefaultState>> {
        let defaults = Self::default();
        Ok(::config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("quote_validity_secs", defaults.quote_validity_secs as i64)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let cfg: GatewayConfig = GatewayConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg, GatewayConfig::default());
        assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let cfg: GatewayConfig = GatewayConfig::defaults()
            .unwrap()
            .set_override("port", 9090i64)
            .unwrap()
            .set_override("tariffs_path", "/etc/haulhub/regions.json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.port, 9090);
        assert_eq!(
            cfg.tariffs_path,
            Some(PathBuf::from("/etc/haulhub/regions.json"))
        );
        assert_eq!(cfg.quote_validity_secs, 300);
    }

    #[test]
    fn test_quote_validity() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.quote_validity().unwrap(), chrono::Duration::seconds(300));

        for secs in [u64::MAX, i64::MAX as u64] {
            let cfg = GatewayConfig {
                quote_validity_secs: secs,
                ..GatewayConfig::default()
            };
            assert!(cfg.quote_validity().is_err(), "{}", secs);
        }
    }
}
