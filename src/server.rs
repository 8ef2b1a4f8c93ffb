use axum::{Router, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::mcp::SearchServer;
use crate::search::{TavilyClient, TavilySettings};

/// Path the MCP streamable HTTP transport is mounted on.
pub const MCP_PATH: &str = "/mcp";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: &AppConfig, settings: TavilySettings) -> anyhow::Result<()> {
    if settings.api_key.is_none() {
        tracing::warn!(
            "TAVILY_API_KEY is not set; every search will fail until it is configured"
        );
    }
    info!(
        name: "search.config.loaded",
        base_url = %settings.base_url,
        "Search provider configured"
    );

    let app = build_router(SearchServer::new(TavilyClient::new(settings)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        mcp_path = MCP_PATH,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Routes: the MCP endpoint plus a liveness probe.
pub fn build_router(search: SearchServer) -> Router {
    let mcp_service = StreamableHttpService::new(
        move || Ok(search.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .nest_service(MCP_PATH, mcp_service)
        .route("/test", get(liveness))
        .layer(TraceLayer::new_for_http())
}

/// GET /test - static acknowledgment.
async fn liveness() -> &'static str {
    "hello, world"
}
