//! Combustível Core Library
//!
//! Shared functionality for the fuel cost calculator:
//! - Efficiency-normalized cost engine (gasoline, ethanol, CNG)
//! - Presentation records with rounding and labels
//! - Static fuel-saving tips
//! - Layered TOML configuration (efficiency table, plausibility limits)
//! - Typed tools with JSON Schema parameters and dispatch by name

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod tips;
pub mod tools;

pub use config::{Bound, Config, InputLimits};
pub use engine::FuelCostEngine;
pub use error::{Error, Result};
pub use models::{
    ComparisonResult, EfficiencyTable, FuelKind, FuelPriceAnalysis, TripLine, TripResult,
    VolumeLine, VolumeResult,
};
pub use report::{
    FuelChoice, FuelChoiceReport, QuickAnswer, SavingsReport, TipsReport, TripReport,
};
pub use tips::Tip;
pub use tools::{
    FuelChoiceParams, OutputMode, SavingsParams, ToolContext, ToolInfo, ToolName, TripParams,
};
