//! Server command implementation

use anyhow::Result;
use combustivel_core::ToolContext;
use combustivel_server::ServerConfig;

pub async fn cmd_serve(
    ctx: ToolContext,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting fuel calculator server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   MCP endpoint: http://{}:{}/mcp", host, port);
    println!(
        "   Efficiency: etanol {:.0}%, gnv {:.0}%",
        ctx.engine.efficiency().ethanol() * 100.0,
        ctx.engine.efficiency().cng() * 100.0
    );
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();

    let config = ServerConfig { allowed_origins };

    combustivel_server::serve(ctx, host, port, config).await
}
