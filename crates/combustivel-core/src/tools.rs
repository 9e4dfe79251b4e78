//! Fuel calculator tools
//!
//! Typed entry points for the four tools. They are used by:
//! 1. The MCP server for external LLM clients
//! 2. The REST endpoint and the CLI, through [`execute`] (dispatch by name)
//!
//! Each tool validates its arguments (engine rules first, then the configured
//! plausibility limits), runs the engine and formats the result.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, InputLimits};
use crate::engine::{self, FuelCostEngine};
use crate::error::{Error, Result};
use crate::report::{FuelChoice, FuelChoiceReport, QuickAnswer, SavingsReport, TipsReport, TripReport};

/// Engine plus argument limits: everything a tool call needs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToolContext {
    pub engine: FuelCostEngine,
    pub limits: InputLimits,
}

impl ToolContext {
    pub fn new(engine: FuelCostEngine, limits: InputLimits) -> Self {
        Self { engine, limits }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            engine: FuelCostEngine::new(config.efficiency),
            limits: config.limits,
        }
    }

    fn check_prices(&self, gasoline: f64, ethanol: f64, cng: Option<f64>) -> Result<()> {
        engine::validate_prices(gasoline, ethanol, cng)?;
        self.limits.check_price("preco_gasolina", gasoline)?;
        self.limits.check_price("preco_etanol", ethanol)?;
        if let Some(price) = cng {
            self.limits.check_price("preco_gnv", price)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tool names
// =============================================================================

/// The tools exposed to hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    QualCombustivelAbastecer,
    CalcularEconomia,
    CompararViagem,
    DicasEconomiaCombustivel,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QualCombustivelAbastecer => "qual_combustivel_abastecer",
            Self::CalcularEconomia => "calcular_economia",
            Self::CompararViagem => "comparar_viagem",
            Self::DicasEconomiaCombustivel => "dicas_economia_combustivel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::QualCombustivelAbastecer => {
                "Determine which fuel is more economical to use. Compares gasoline, ethanol and CNG considering efficiency."
            }
            Self::CalcularEconomia => {
                "Calculate how much you save for a reference volume of gasoline when using ethanol or CNG instead."
            }
            Self::CompararViagem => {
                "Compare fuel costs for a trip: quantity, total cost and cost per km for each fuel, ranked by cost."
            }
            Self::DicasEconomiaCombustivel => "Get 7 practical tips on how to save fuel.",
        }
    }

    pub fn all() -> &'static [ToolName] {
        &[
            Self::QualCombustivelAbastecer,
            Self::CalcularEconomia,
            Self::CompararViagem,
            Self::DicasEconomiaCombustivel,
        ]
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .find(|tool| tool.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownTool(s.to_string()))
    }
}

/// Name and description of a tool, for listings
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn list_tools() -> Vec<ToolInfo> {
    ToolName::all()
        .iter()
        .map(|tool| ToolInfo {
            name: tool.as_str(),
            description: tool.description(),
        })
        .collect()
}

// =============================================================================
// qual_combustivel_abastecer
// =============================================================================

/// Output mode for `qual_combustivel_abastecer`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Detailed analysis
    #[default]
    Completo,
    /// Quick answer
    Resumido,
}

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct FuelChoiceParams {
    /// Gasoline price per liter (R$)
    #[serde(rename = "preco_gasolina")]
    #[schemars(description = "Gasoline price per liter (R$)")]
    pub gasoline_price: f64,

    /// Ethanol price per liter (R$)
    #[serde(rename = "preco_etanol")]
    #[schemars(description = "Ethanol price per liter (R$)")]
    pub ethanol_price: f64,

    /// CNG price per m³ (R$), optional
    #[serde(rename = "preco_gnv", default)]
    #[schemars(description = "CNG price per cubic meter (R$) - optional")]
    pub cng_price: Option<f64>,

    /// Output mode
    #[serde(rename = "modo_saida", default)]
    #[schemars(
        description = "\"completo\" for detailed analysis, \"resumido\" for a quick answer"
    )]
    pub mode: OutputMode,
}

pub fn qual_combustivel_abastecer(ctx: &ToolContext, params: FuelChoiceParams) -> Result<FuelChoice> {
    ctx.check_prices(params.gasoline_price, params.ethanol_price, params.cng_price)?;

    let result = ctx.engine.compute_single_price_comparison(
        params.gasoline_price,
        params.ethanol_price,
        params.cng_price,
    )?;

    Ok(match params.mode {
        OutputMode::Completo => {
            FuelChoice::Full(FuelChoiceReport::new(&result, ctx.engine.efficiency()))
        }
        OutputMode::Resumido => FuelChoice::Quick(QuickAnswer::new(&result)),
    })
}

// =============================================================================
// calcular_economia
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct SavingsParams {
    /// Gasoline price per liter (R$)
    #[serde(rename = "preco_gasolina")]
    #[schemars(description = "Gasoline price per liter (R$)")]
    pub gasoline_price: f64,

    /// Ethanol price per liter (R$)
    #[serde(rename = "preco_etanol")]
    #[schemars(description = "Ethanol price per liter (R$)")]
    pub ethanol_price: f64,

    /// Reference volume of gasoline in liters
    #[serde(rename = "litros")]
    #[schemars(description = "Amount of gasoline liters used as reference")]
    pub liters: f64,

    /// CNG price per m³ (R$), optional
    #[serde(rename = "preco_gnv", default)]
    #[schemars(description = "CNG price per cubic meter (R$) - optional")]
    pub cng_price: Option<f64>,
}

pub fn calcular_economia(ctx: &ToolContext, params: SavingsParams) -> Result<SavingsReport> {
    ctx.check_prices(params.gasoline_price, params.ethanol_price, params.cng_price)?;
    engine::validate_volume(params.liters)?;
    ctx.limits.check_liters("litros", params.liters)?;

    let result = ctx.engine.compute_volume_comparison(
        params.gasoline_price,
        params.ethanol_price,
        params.liters,
        params.cng_price,
    )?;

    Ok(SavingsReport::new(&result))
}

// =============================================================================
// comparar_viagem
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct TripParams {
    /// Trip distance in km
    #[serde(rename = "distancia")]
    #[schemars(description = "Trip distance in km")]
    pub distance_km: f64,

    /// Vehicle consumption with gasoline (km/L)
    #[serde(rename = "consumo_gasolina")]
    #[schemars(description = "Vehicle consumption in km/L with gasoline")]
    pub consumption: f64,

    /// Gasoline price per liter (R$)
    #[serde(rename = "preco_gasolina")]
    #[schemars(description = "Gasoline price per liter (R$)")]
    pub gasoline_price: f64,

    /// Ethanol price per liter (R$)
    #[serde(rename = "preco_etanol")]
    #[schemars(description = "Ethanol price per liter (R$)")]
    pub ethanol_price: f64,

    /// CNG price per m³ (R$), optional
    #[serde(rename = "preco_gnv", default)]
    #[schemars(description = "CNG price per cubic meter (R$) - optional")]
    pub cng_price: Option<f64>,
}

pub fn comparar_viagem(ctx: &ToolContext, params: TripParams) -> Result<TripReport> {
    engine::validate_trip(params.distance_km, params.consumption)?;
    ctx.limits.check_distance("distancia", params.distance_km)?;
    ctx.limits
        .check_consumption("consumo_gasolina", params.consumption)?;
    ctx.check_prices(params.gasoline_price, params.ethanol_price, params.cng_price)?;

    let result = ctx.engine.compute_trip_comparison(
        params.distance_km,
        params.consumption,
        params.gasoline_price,
        params.ethanol_price,
        params.cng_price,
    )?;

    Ok(TripReport::new(&result))
}

// =============================================================================
// dicas_economia_combustivel
// =============================================================================

pub fn dicas_economia_combustivel(ctx: &ToolContext) -> TipsReport {
    TipsReport::new(ctx.engine.static_tips(), ctx.engine.efficiency())
}

// =============================================================================
// Dispatch by name
// =============================================================================

fn parse_params<T: serde::de::DeserializeOwned>(args: &serde_json::Value) -> Result<T> {
    // Tools without required arguments accept a missing body
    let args = if args.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        args.clone()
    };
    serde_json::from_value(args).map_err(|e| Error::InvalidInput(format!("Invalid params: {}", e)))
}

/// Run a tool by name with JSON arguments, returning the JSON result
pub fn execute(ctx: &ToolContext, name: &str, args: &serde_json::Value) -> Result<serde_json::Value> {
    let tool: ToolName = name.parse()?;
    debug!(tool = %tool, "Executing tool");

    let value = match tool {
        ToolName::QualCombustivelAbastecer => {
            serde_json::to_value(qual_combustivel_abastecer(ctx, parse_params(args)?)?)?
        }
        ToolName::CalcularEconomia => {
            serde_json::to_value(calcular_economia(ctx, parse_params(args)?)?)?
        }
        ToolName::CompararViagem => {
            serde_json::to_value(comparar_viagem(ctx, parse_params(args)?)?)?
        }
        ToolName::DicasEconomiaCombustivel => {
            serde_json::to_value(dicas_economia_combustivel(ctx))?
        }
    };

    Ok(value)
}
