//! MCP (Model Context Protocol) Server for the fuel calculator
//!
//! Exposes the fuel cost tools to LLM hosts. Every tool is a pure computation
//! over its arguments; no state is kept between calls.
//!
//! # Architecture
//!
//! The MCP service is nested at `/mcp` in the main router, using the
//! Streamable HTTP transport, so it shares the port with the REST endpoints.
//!
//! # Available Tools
//!
//! - `qual_combustivel_abastecer` - Which fuel to fill up with
//! - `calcular_economia` - Savings for a reference volume of gasoline
//! - `comparar_viagem` - Trip cost per fuel, ranked
//! - `dicas_economia_combustivel` - Seven fuel-saving tips

mod tools;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use tracing::debug;

pub use tools::*;

/// MCP server name announced to hosts
pub const SERVER_NAME: &str = "calculadora-combustivel";

/// Fuel calculator MCP server state
#[derive(Clone)]
pub struct CombustivelMcpServer {
    /// Engine and argument limits (immutable, copied per session)
    ctx: ToolContext,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl CombustivelMcpServer {
    pub fn new(ctx: ToolContext) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for CombustivelMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Calculadora de Combustível".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Fuel cost calculator for gasoline, ethanol and CNG. Prices are per liter \
                 (per cubic meter for CNG) in R$. Costs are normalized by each fuel's \
                 efficiency before comparing."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl CombustivelMcpServer {
    /// Which fuel to fill up with
    #[tool(
        description = "Determine which fuel is more economical to use. Compares gasoline, ethanol and CNG considering efficiency."
    )]
    async fn qual_combustivel_abastecer(
        &self,
        Parameters(params): Parameters<FuelChoiceParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = "qual_combustivel_abastecer", "MCP tool call");
        into_call_result(tools::qual_combustivel_abastecer(&self.ctx, params))
    }

    /// Savings for a reference volume of gasoline
    #[tool(
        description = "Calculate how much you save for a reference volume of gasoline when using ethanol or CNG instead."
    )]
    async fn calcular_economia(
        &self,
        Parameters(params): Parameters<SavingsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = "calcular_economia", "MCP tool call");
        into_call_result(tools::calcular_economia(&self.ctx, params))
    }

    /// Trip cost comparison
    #[tool(
        description = "Compare fuel costs for a trip: quantity, total cost and cost per km for each fuel, ranked by cost."
    )]
    async fn comparar_viagem(
        &self,
        Parameters(params): Parameters<TripParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = "comparar_viagem", "MCP tool call");
        into_call_result(tools::comparar_viagem(&self.ctx, params))
    }

    #[tool(description = "Get 7 practical tips on how to save fuel.")]
    async fn dicas_economia_combustivel(&self) -> Result<CallToolResult, McpError> {
        debug!(tool = "dicas_economia_combustivel", "MCP tool call");
        into_call_result(Ok(tools::dicas_economia_combustivel(&self.ctx)))
    }
}

/// Streamable HTTP service creating one MCP server per session
pub fn mcp_service(
    ctx: ToolContext,
) -> StreamableHttpService<CombustivelMcpServer, LocalSessionManager> {
    StreamableHttpService::new(
        move || Ok(CombustivelMcpServer::new(ctx)),
        LocalSessionManager::default().into(),
        Default::default(),
    )
}
