//! Model Context Protocol (MCP) server and client for the search tool.
//!
//! # Server
//!
//! [`SearchServer`] implements rmcp's `ServerHandler` and exposes a single
//! tool, `tavily_search`, backed by a [`TavilyClient`](crate::search::TavilyClient).
//! It is served over streamable HTTP by [`crate::server`] or over stdio.
//!
//! # Client
//!
//! [`ClientCache`] opens one MCP session per remote base URL and hands out
//! [`SearchClient`] handles that call `tavily_search` on that server:
//!
//! ```rust,no_run
//! use search_mcp::mcp::ClientCache;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = ClientCache::streamable_http();
//! let client = cache.get_or_create("http://localhost:8080/mcp").await?;
//! let text = client.tavily_search("latest rust release", Some("news")).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod handler;
pub mod tool;

pub use client::{
    ClientCache, SearchClient, SessionConnector, StreamableHttpConnector, ToolSession,
};
pub use handler::SearchServer;
pub use tool::{SearchTool, TAVILY_SEARCH_TOOL};

use rmcp::model::{Content, RawContent};

/// Join the text blocks of a tool result.
pub fn content_text(content: &[Content]) -> String {
    content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
