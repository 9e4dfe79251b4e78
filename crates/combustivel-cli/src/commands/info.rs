//! Tool listing, generic tool calls and config display

use std::path::Path;

use anyhow::{Context, Result};
use combustivel_core::config::{default_config_path, Bound};
use combustivel_core::tools::{self, ToolContext};
use combustivel_core::FuelKind;

use super::load_config;

pub fn cmd_tools(json: bool) -> Result<()> {
    let available = tools::list_tools();

    if json {
        println!("{}", serde_json::to_string_pretty(&available)?);
        return Ok(());
    }

    println!("🧰 Available tools:");
    for tool in available {
        println!();
        println!("   {}", tool.name);
        println!("      {}", tool.description);
    }

    Ok(())
}

/// Run a tool by name; output is always JSON
pub fn cmd_call(ctx: &ToolContext, name: &str, args: &str) -> Result<()> {
    let args: serde_json::Value =
        serde_json::from_str(args).context("Arguments must be a JSON object")?;
    let result = tools::execute(ctx, name, &args)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn bound_label(bound: &Bound) -> String {
    match (bound.min, bound.max) {
        (None, None) => "unbounded".to_string(),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (Some(min), Some(max)) => format!("{} .. {}", min, max),
    }
}

pub fn cmd_config(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let source = config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .filter(|p| p.exists());

    println!("⚙️  Configuration");
    match source {
        Some(path) => println!("   Source: {}", path.display()),
        None => println!("   Source: built-in defaults"),
    }

    println!();
    println!("   Efficiency (relative to gasoline):");
    for fuel in FuelKind::all() {
        println!(
            "      {:<8} {:.0}%",
            fuel.display_name(),
            config.efficiency.ratio(*fuel) * 100.0
        );
    }

    println!();
    println!("   Limits:");
    println!("      price        {}", bound_label(&config.limits.price));
    println!("      liters       {}", bound_label(&config.limits.liters));
    println!("      distance     {}", bound_label(&config.limits.distance));
    println!("      consumption  {}", bound_label(&config.limits.consumption));

    Ok(())
}
