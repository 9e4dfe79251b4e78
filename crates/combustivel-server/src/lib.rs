//! Combustível Server
//!
//! Axum-based host for the fuel cost tools:
//! - `/mcp` - MCP Streamable HTTP transport (the primary interface)
//! - `GET /health` - liveness probe
//! - `GET /api/tools` - tool names and descriptions
//! - `POST /api/tools/:name` - run a tool with a JSON argument object
//!
//! Tool calls are independent pure computations, so the server holds no
//! mutable state and needs no locking.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use combustivel_core::tools::{self, ToolContext, ToolInfo, ToolName};

pub mod mcp;

pub use mcp::{mcp_service, CombustivelMcpServer, SERVER_NAME};

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub ctx: ToolContext,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub tools: Vec<&'static str>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVER_NAME,
        version: env!("CARGO_PKG_VERSION"),
        tools: ToolName::all().iter().map(ToolName::as_str).collect(),
    })
}

async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(tools::list_tools())
}

async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let args = body.map(|Json(v)| v).unwrap_or_default();
    let result = tools::execute(&state.ctx, &name, &args)?;
    Ok(Json(result))
}

/// Create the application router
pub fn create_router(ctx: ToolContext, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { ctx });

    let api_routes = Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(state)
        .nest_service("/mcp", mcp_service(ctx))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server and run until Ctrl+C
pub async fn serve(
    ctx: ToolContext,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if host != "127.0.0.1" && host != "localhost" {
        warn!("⚠️  Listening on {} - the server has no authentication", host);
    }

    let app = create_router(ctx, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP endpoint ready at http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<combustivel_core::Error> for AppError {
    fn from(err: combustivel_core::Error) -> Self {
        match err {
            combustivel_core::Error::UnknownTool(_) => Self::not_found(&err.to_string()),
            e if e.is_input_error() => Self::bad_request(&e.to_string()),
            e => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(e.into()),
            },
        }
    }
}
