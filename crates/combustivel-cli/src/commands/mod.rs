//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config resolution, output rendering)
//! - `compare` - Fuel comparison commands (abastecer, economia, viagem, dicas)
//! - `info` - Tool listing, generic tool calls and config display
//! - `serve` - MCP + HTTP server command

pub mod compare;
pub mod core;
pub mod info;
pub mod serve;

// Re-export command functions for main.rs
pub use compare::*;
pub use core::*;
pub use info::*;
pub use serve::*;
