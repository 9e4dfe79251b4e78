//! MCP tool plumbing
//!
//! Re-exports the tool types from combustivel_core::tools and converts their
//! results into MCP responses. The implementations live in combustivel-core so
//! the REST endpoint and the CLI share them.

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

pub use combustivel_core::tools::{
    // Functions
    calcular_economia,
    comparar_viagem,
    dicas_economia_combustivel,
    qual_combustivel_abastecer,
    // Params types
    FuelChoiceParams,
    OutputMode,
    SavingsParams,
    ToolContext,
    TripParams,
};

/// Serialize a tool result as pretty JSON text content.
///
/// Bad arguments map to `invalid_params`, anything else to `internal_error`.
pub fn into_call_result<T: Serialize>(
    result: combustivel_core::Result<T>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(e) if e.is_input_error() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}
