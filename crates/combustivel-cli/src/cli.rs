//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Combustível - Which fuel is worth it: gasoline, ethanol or CNG?
#[derive(Parser)]
#[command(name = "combustivel")]
#[command(about = "Fuel cost calculator and MCP tool server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (TOML with [efficiency] and [limits])
    ///
    /// Falls back to COMBUSTIVEL_CONFIG, then to
    /// <data dir>/calculadora-combustivel/config.toml, then to built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP + HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Which fuel to fill up with
    Abastecer {
        /// Gasoline price per liter (R$)
        #[arg(long)]
        gasolina: f64,

        /// Ethanol price per liter (R$)
        #[arg(long)]
        etanol: f64,

        /// CNG price per m³ (R$)
        #[arg(long)]
        gnv: Option<f64>,

        /// Quick answer instead of the full analysis
        #[arg(long)]
        resumido: bool,
    },

    /// Savings for a reference volume of gasoline
    Economia {
        /// Gasoline price per liter (R$)
        #[arg(long)]
        gasolina: f64,

        /// Ethanol price per liter (R$)
        #[arg(long)]
        etanol: f64,

        /// Reference volume of gasoline in liters
        #[arg(long)]
        litros: f64,

        /// CNG price per m³ (R$)
        #[arg(long)]
        gnv: Option<f64>,
    },

    /// Compare trip costs per fuel
    Viagem {
        /// Trip distance in km
        #[arg(long)]
        distancia: f64,

        /// Vehicle consumption with gasoline (km/L)
        #[arg(long)]
        consumo: f64,

        /// Gasoline price per liter (R$)
        #[arg(long)]
        gasolina: f64,

        /// Ethanol price per liter (R$)
        #[arg(long)]
        etanol: f64,

        /// CNG price per m³ (R$)
        #[arg(long)]
        gnv: Option<f64>,
    },

    /// Fuel-saving tips
    Dicas,

    /// List the available tools
    Tools,

    /// Run a tool by name with JSON arguments
    Call {
        /// Tool name (see `combustivel tools`)
        name: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Show the resolved configuration
    Config,
}
