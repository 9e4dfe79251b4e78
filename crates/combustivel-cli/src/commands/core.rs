//! Shared command utilities
//!
//! This module contains:
//! - `resolve_config_path` - Pick the config file from --config or the environment
//! - `load_context` - Load config and build the tool context
//! - `render` - Format a result as text or JSON

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use combustivel_core::{Config, ToolContext};
use serde::Serialize;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "COMBUSTIVEL_CONFIG";

/// --config wins over COMBUSTIVEL_CONFIG
pub fn resolve_config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    Config::load(config_path).context("Failed to load configuration")
}

pub fn load_context(config_path: Option<&Path>) -> Result<ToolContext> {
    Ok(ToolContext::from_config(&load_config(config_path)?))
}

/// Text via `Display`, or pretty JSON with `--json`
pub fn render<T: Serialize + Display>(value: &T, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(value).context("Failed to serialize result")
    } else {
        Ok(value.to_string())
    }
}
