//! Calculator configuration
//!
//! Holds the efficiency table and the optional plausibility limits applied to
//! tool arguments.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/calculadora-combustivel/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{EfficiencyTable, CNG_EFFICIENCY, ETHANOL_EFFICIENCY, GASOLINE_EFFICIENCY};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Inclusive bounds for one kind of argument; a missing side is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bound {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Check `value` against the bound, naming `field` in the error
    pub fn check(&self, field: &str, value: f64) -> Result<()> {
        if let Some(min) = self.min {
            if value < min {
                return Err(Error::InvalidInput(format!(
                    "{} must be at least {}, got {}",
                    field, min, value
                )));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(Error::InvalidInput(format!(
                    "{} must be at most {}, got {}",
                    field, max, value
                )));
            }
        }
        Ok(())
    }
}

/// Plausibility limits for tool arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InputLimits {
    /// Price per liter or per m³
    pub price: Bound,
    /// Reference gasoline volume
    pub liters: Bound,
    /// Trip distance in km
    pub distance: Bound,
    /// Vehicle consumption in km/L
    pub consumption: Bound,
}

impl InputLimits {
    /// No limits at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn check_price(&self, field: &str, value: f64) -> Result<()> {
        self.price.check(field, value)
    }

    pub fn check_liters(&self, field: &str, value: f64) -> Result<()> {
        self.liters.check(field, value)
    }

    pub fn check_distance(&self, field: &str, value: f64) -> Result<()> {
        self.distance.check(field, value)
    }

    pub fn check_consumption(&self, field: &str, value: f64) -> Result<()> {
        self.consumption.check(field, value)
    }
}

/// Resolved configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Config {
    pub efficiency: EfficiencyTable,
    pub limits: InputLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            efficiency: EfficiencyTable::default(),
            limits: InputLimits::unbounded(),
        }
    }
}

impl Config {
    /// Load from `path` if it exists, else the data-dir override, else the embedded default
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading config override");
                fs::read_to_string(&path)?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// Embedded default configuration
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }
}

/// Default override location in the platform data dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("calculadora-combustivel").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    efficiency: Option<RawEfficiency>,
    limits: Option<RawLimits>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEfficiency {
    gasolina: Option<f64>,
    etanol: Option<f64>,
    gnv: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLimits {
    price_min: Option<f64>,
    price_max: Option<f64>,
    liters_min: Option<f64>,
    liters_max: Option<f64>,
    distance_min: Option<f64>,
    distance_max: Option<f64>,
    consumption_min: Option<f64>,
    consumption_max: Option<f64>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let efficiency = match raw.efficiency {
        Some(eff) => EfficiencyTable::new(
            eff.gasolina.unwrap_or(GASOLINE_EFFICIENCY),
            eff.etanol.unwrap_or(ETHANOL_EFFICIENCY),
            eff.gnv.unwrap_or(CNG_EFFICIENCY),
        )?,
        None => EfficiencyTable::default(),
    };

    let limits = match raw.limits {
        Some(limits) => InputLimits {
            price: Bound::new(limits.price_min, limits.price_max),
            liters: Bound::new(limits.liters_min, limits.liters_max),
            distance: Bound::new(limits.distance_min, limits.distance_max),
            consumption: Bound::new(limits.consumption_min, limits.consumption_max),
        },
        None => InputLimits::unbounded(),
    };

    Ok(Config { efficiency, limits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelKind;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.efficiency, EfficiencyTable::default());
        assert_eq!(config.limits.price, Bound::new(Some(2.5), Some(10.0)));
        assert_eq!(config.limits.consumption, Bound::new(Some(3.0), Some(30.0)));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_efficiency_override() {
        let config = parse_config("[efficiency]\netanol = 0.72\n").unwrap();
        assert_eq!(config.efficiency.ratio(FuelKind::Ethanol), 0.72);
        assert_eq!(config.efficiency.ratio(FuelKind::Cng), 0.6);
        assert_eq!(config.limits, InputLimits::unbounded());
    }

    #[test]
    fn test_out_of_range_efficiency_rejected() {
        let err = parse_config("[efficiency]\ngnv = 1.5\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("[efficiency]\ndiesel = 1.1\n").is_err());
    }

    #[test]
    fn test_bound_check() {
        let bound = Bound::new(Some(2.5), Some(10.0));
        assert!(bound.check("preco_gasolina", 2.5).is_ok());
        assert!(bound.check("preco_gasolina", 10.0).is_ok());
        assert!(matches!(
            bound.check("preco_gasolina", 2.49),
            Err(Error::InvalidInput(_))
        ));
        assert!(bound.check("preco_gasolina", 10.01).is_err());
        assert!(Bound::default().check("x", 1e9).is_ok());
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[efficiency]\netanol = 0.75\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.efficiency.ethanol(), 0.75);
        assert_eq!(config.limits, InputLimits::unbounded());
    }

    #[test]
    fn test_load_missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config, Config::embedded().unwrap());
    }
}
