//! Data models for fuel cost comparisons
//!
//! Everything here is a transient value: built, computed and returned within a
//! single tool call. Labels and rounding live in [`crate::report`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Efficiency of gasoline, the comparison baseline
pub const GASOLINE_EFFICIENCY: f64 = 1.0;

/// Ethanol delivers ~70% of gasoline's mileage per liter
pub const ETHANOL_EFFICIENCY: f64 = 0.7;

/// CNG delivers ~60% of gasoline's mileage per cubic meter
pub const CNG_EFFICIENCY: f64 = 0.6;

/// Fuel kinds, declared in tie-break priority order (gasoline > ethanol > CNG)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
pub enum FuelKind {
    #[serde(rename = "GASOLINA")]
    Gasoline,
    #[serde(rename = "ETANOL")]
    Ethanol,
    #[serde(rename = "GNV")]
    Cng,
}

impl FuelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "GASOLINA",
            Self::Ethanol => "ETANOL",
            Self::Cng => "GNV",
        }
    }

    /// Human-facing name used in explanations
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gasoline => "Gasolina",
            Self::Ethanol => "Etanol",
            Self::Cng => "GNV",
        }
    }

    /// Unit the fuel is sold by
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Gasoline | Self::Ethanol => "L",
            Self::Cng => "m³",
        }
    }

    /// All fuel kinds in priority order
    pub fn all() -> &'static [FuelKind] {
        &[Self::Gasoline, Self::Ethanol, Self::Cng]
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Efficiency ratio of each fuel relative to gasoline.
///
/// Built once at startup (embedded default or config override) and never
/// mutated afterwards. Every ratio is in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyTable {
    #[serde(rename = "gasolina")]
    gasoline: f64,
    #[serde(rename = "etanol")]
    ethanol: f64,
    #[serde(rename = "gnv")]
    cng: f64,
}

impl EfficiencyTable {
    /// Create a table, rejecting ratios outside `(0, 1]`
    pub fn new(gasoline: f64, ethanol: f64, cng: f64) -> Result<Self> {
        for (fuel, ratio) in [
            (FuelKind::Gasoline, gasoline),
            (FuelKind::Ethanol, ethanol),
            (FuelKind::Cng, cng),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(Error::Config(format!(
                    "Efficiency for {} must be in (0, 1], got {}",
                    fuel, ratio
                )));
            }
        }

        Ok(Self {
            gasoline,
            ethanol,
            cng,
        })
    }

    pub fn gasoline(&self) -> f64 {
        self.gasoline
    }

    pub fn ethanol(&self) -> f64 {
        self.ethanol
    }

    pub fn cng(&self) -> f64 {
        self.cng
    }

    pub fn ratio(&self, fuel: FuelKind) -> f64 {
        match fuel {
            FuelKind::Gasoline => self.gasoline,
            FuelKind::Ethanol => self.ethanol,
            FuelKind::Cng => self.cng,
        }
    }

    /// Price ratio (percent of gasoline's price) below which `fuel` pays off
    pub fn breakeven_percent(&self, fuel: FuelKind) -> f64 {
        self.ratio(fuel) * 100.0
    }
}

impl Default for EfficiencyTable {
    fn default() -> Self {
        Self {
            gasoline: GASOLINE_EFFICIENCY,
            ethanol: ETHANOL_EFFICIENCY,
            cng: CNG_EFFICIENCY,
        }
    }
}

// =============================================================================
// Single price comparison
// =============================================================================

/// Per-fuel line of a price comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelPriceAnalysis {
    pub fuel: FuelKind,
    pub price: f64,
    /// Price divided by efficiency: cost of one gasoline-equivalent unit
    pub normalized_cost: f64,
    pub efficiency_ratio: f64,
    /// Savings vs gasoline's normalized cost; `None` for gasoline itself
    pub savings_percent: Option<f64>,
    /// Price as a percentage of gasoline's price; `None` for gasoline itself
    pub price_ratio_percent: Option<f64>,
    /// Whether the price ratio is below the breakeven; `None` for gasoline itself
    pub worthwhile: Option<bool>,
    pub recommended: bool,
}

/// Result of comparing unit prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub gasoline: FuelPriceAnalysis,
    pub ethanol: FuelPriceAnalysis,
    pub cng: Option<FuelPriceAnalysis>,
    pub best: FuelKind,
    pub ethanol_price_ratio_percent: f64,
    /// Ethanol breakeven holds (strictly below its efficiency ratio)
    pub compensa: bool,
}

impl ComparisonResult {
    pub fn ethanol_savings_percent(&self) -> f64 {
        self.ethanol.savings_percent.unwrap_or_default()
    }

    pub fn cng_savings_percent(&self) -> Option<f64> {
        self.cng.and_then(|c| c.savings_percent)
    }

    /// Savings of the recommended fuel (zero when gasoline wins)
    pub fn best_savings_percent(&self) -> f64 {
        match self.best {
            FuelKind::Gasoline => 0.0,
            FuelKind::Ethanol => self.ethanol_savings_percent(),
            FuelKind::Cng => self.cng_savings_percent().unwrap_or_default(),
        }
    }

    /// Lines in priority order, skipping CNG when it was not priced
    pub fn lines(&self) -> impl Iterator<Item = &FuelPriceAnalysis> {
        [Some(&self.gasoline), Some(&self.ethanol), self.cng.as_ref()]
            .into_iter()
            .flatten()
    }
}

// =============================================================================
// Volume comparison
// =============================================================================

/// Per-fuel line of a volume comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeLine {
    pub fuel: FuelKind,
    pub price: f64,
    /// Volume (L or m³) delivering the same work as the reference gasoline
    pub quantity: f64,
    pub cost: f64,
    /// Gasoline cost minus this cost; negative when this fuel is dearer
    pub savings: f64,
}

/// Result of comparing a reference gasoline volume across fuels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeResult {
    pub reference_liters: f64,
    pub gasoline: VolumeLine,
    pub ethanol: VolumeLine,
    pub cng: Option<VolumeLine>,
    pub best: FuelKind,
    /// Savings of the best fuel (zero when gasoline wins)
    pub total_savings: f64,
    pub savings_percent: f64,
}

impl VolumeResult {
    /// Alternatives that cost more than gasoline, with the extra amount
    pub fn losses(&self) -> Vec<(FuelKind, f64)> {
        [Some(&self.ethanol), self.cng.as_ref()]
            .into_iter()
            .flatten()
            .filter(|line| line.savings < 0.0)
            .map(|line| (line.fuel, -line.savings))
            .collect()
    }
}

// =============================================================================
// Trip comparison
// =============================================================================

/// Per-fuel line of a trip comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripLine {
    pub fuel: FuelKind,
    pub price: f64,
    /// Effective consumption in km per unit (L or m³)
    pub consumption: f64,
    pub quantity: f64,
    pub cost: f64,
    pub cost_per_km: f64,
    /// Gasoline cost minus this cost
    pub savings: f64,
    pub savings_percent: f64,
}

/// Result of comparing a trip across fuels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    pub distance_km: f64,
    pub gasoline_consumption: f64,
    pub gasoline: TripLine,
    pub ethanol: TripLine,
    pub cng: Option<TripLine>,
    /// Fuels ordered by ascending trip cost
    pub ranking: Vec<FuelKind>,
    pub recommended: FuelKind,
    pub best_cost: f64,
}

impl TripResult {
    pub fn line(&self, fuel: FuelKind) -> Option<&TripLine> {
        match fuel {
            FuelKind::Gasoline => Some(&self.gasoline),
            FuelKind::Ethanol => Some(&self.ethanol),
            FuelKind::Cng => self.cng.as_ref(),
        }
    }
}
