//! rmcp [`ServerHandler`] exposing the search tool.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::io::stdio;
use rmcp::{ErrorData, ServerHandler, ServiceExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::mcp::tool::{SearchTool, TAVILY_SEARCH_TOOL, tavily_search_tool};
use crate::search::TavilyClient;

/// Server name reported during the initialize handshake.
pub const SERVER_NAME: &str = "search_mcp";

/// MCP server handler. Cheap to clone; one instance is created per session.
#[derive(Debug, Clone)]
pub struct SearchServer {
    tool: SearchTool,
    name: String,
    version: String,
}

impl SearchServer {
    #[must_use]
    pub fn new(client: TavilyClient) -> Self {
        Self {
            tool: SearchTool::new(Arc::new(client)),
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        info!(name: "server.started", transport = "stdio", "Serving MCP over stdio");
        let (stdin, stdout) = stdio();
        self.serve_io(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC over a byte stream pair until the peer
    /// closes it.
    pub async fn serve_io<R, W>(self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let service = self.serve((reader, writer)).await?;
        let reason = service.waiting().await?;
        info!(name: "server.stopped", reason = ?reason, "MCP session closed");
        Ok(())
    }
}

impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Default::default()
            },
            instructions: Some(
                "Use tavily_search to look up current information on the web.".to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(vec![tavily_search_tool()]))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if request.name != TAVILY_SEARCH_TOOL {
            return Err(ErrorData::invalid_params(
                format!("tool not found: {}", request.name),
                None,
            ));
        }
        Ok(self.tool.call(request.arguments.as_ref()).await)
    }
}
