//! Combustível CLI - Fuel cost calculator
//!
//! Usage:
//!   combustivel serve --port 3000                          Start MCP + HTTP server
//!   combustivel abastecer --gasolina 5.89 --etanol 3.99    Which fuel to fill up with
//!   combustivel viagem --distancia 300 --consumo 12 ...    Trip cost per fuel
//!   combustivel call comparar_viagem '{"distancia": 300}'  Run a tool with JSON args

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = commands::resolve_config_path(cli.config.as_deref());
    let config_path = config_path.as_deref();

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_serve(ctx, &host, port, allowed_origins).await
        }
        Commands::Abastecer {
            gasolina,
            etanol,
            gnv,
            resumido,
        } => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_abastecer(&ctx, gasolina, etanol, gnv, resumido, cli.json)
        }
        Commands::Economia {
            gasolina,
            etanol,
            litros,
            gnv,
        } => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_economia(&ctx, gasolina, etanol, litros, gnv, cli.json)
        }
        Commands::Viagem {
            distancia,
            consumo,
            gasolina,
            etanol,
            gnv,
        } => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_viagem(&ctx, distancia, consumo, gasolina, etanol, gnv, cli.json)
        }
        Commands::Dicas => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_dicas(&ctx, cli.json)
        }
        Commands::Tools => commands::cmd_tools(cli.json),
        Commands::Call { name, args } => {
            let ctx = commands::load_context(config_path)?;
            commands::cmd_call(&ctx, &name, &args)
        }
        Commands::Config => commands::cmd_config(config_path, cli.json),
    }
}
