//! MCP client for a remote search server, with a per-URL session cache.
//!
//! Opening a session costs a transport setup plus the initialize handshake, so
//! [`ClientCache`] keeps one [`SearchClient`] per base URL for as long as the
//! cache lives. Lookups go through a concurrent map; creation is serialized by
//! a single lock and re-checks the map, so concurrent first calls for one URL
//! open exactly one session.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use rmcp::ServiceExt;
use rmcp::model::{CallToolRequestParam, CallToolResult, JsonObject};
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::StreamableHttpClientTransport;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use crate::error::ClientError;
use crate::mcp::content_text;
use crate::mcp::tool::{QUERY_KEY, TAVILY_SEARCH_TOOL, TOPIC_KEY};

/// An initialized MCP session able to run `tools/call`.
#[async_trait]
pub trait ToolSession: Send + Sync {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ClientError>;
}

/// Opens new sessions for [`ClientCache`].
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Open a transport, start the session and complete the handshake.
    ///
    /// On failure any partially opened transport must be released.
    async fn connect(&self, base_url: &str) -> Result<Arc<dyn ToolSession>, ClientError>;
}

/// Session over rmcp's streamable HTTP client transport.
pub struct McpSession {
    service: RunningService<RoleClient, ()>,
}

impl fmt::Debug for McpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McpSession").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
    ) -> Result<CallToolResult, ClientError> {
        self.service
            .call_tool(request)
            .await
            .map_err(ClientError::Call)
    }
}

/// Production connector: streamable HTTP transport plus rmcp handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamableHttpConnector;

#[async_trait]
impl SessionConnector for StreamableHttpConnector {
    async fn connect(&self, base_url: &str) -> Result<Arc<dyn ToolSession>, ClientError> {
        let connect_err = |reason: String| ClientError::Connect {
            base_url: base_url.to_string(),
            reason,
        };

        let url = Url::parse(base_url).map_err(|e| connect_err(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(connect_err(format!("unsupported scheme `{}`", url.scheme())));
        }

        // `serve` consumes the transport; on error it is dropped and its
        // connections closed before we return.
        let transport = StreamableHttpClientTransport::from_uri(base_url.to_string());
        let service = ()
            .serve(transport)
            .await
            .map_err(|e| connect_err(e.to_string()))?;

        Ok(Arc::new(McpSession { service }))
    }
}

/// Handle to one remote search server. Clones share the same session.
#[derive(Clone)]
pub struct SearchClient {
    base_url: Arc<str>,
    session: Arc<dyn ToolSession>,
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SearchClient {
    #[must_use]
    pub fn new(base_url: &str, session: Arc<dyn ToolSession>) -> Self {
        Self {
            base_url: base_url.into(),
            session,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `tavily_search` on the remote server.
    ///
    /// `topic` is only sent when given; the server then applies its default.
    pub async fn tavily_search(
        &self,
        query: &str,
        topic: Option<&str>,
    ) -> Result<String, ClientError> {
        let mut arguments = JsonObject::new();
        arguments.insert(QUERY_KEY.to_string(), query.into());
        if let Some(topic) = topic {
            arguments.insert(TOPIC_KEY.to_string(), topic.into());
        }

        debug!(
            base_url = %self.base_url,
            has_topic = topic.is_some(),
            "Calling remote search tool"
        );
        let result = self
            .session
            .call_tool(CallToolRequestParam {
                name: TAVILY_SEARCH_TOOL.into(),
                arguments: Some(arguments),
            })
            .await?;

        let text = content_text(&result.content);
        if result.is_error == Some(true) {
            return Err(ClientError::RemoteTool(text));
        }
        Ok(text)
    }
}

/// Per-base-URL cache of [`SearchClient`]s.
///
/// Entries live as long as the cache; there is no eviction. Share it behind an
/// `Arc` to reuse sessions across tasks.
pub struct ClientCache {
    clients: DashMap<String, SearchClient>,
    create_lock: Mutex<()>,
    connector: Arc<dyn SessionConnector>,
}

impl fmt::Debug for ClientCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCache")
            .field("client_count", &self.clients.len())
            .finish()
    }
}

impl ClientCache {
    /// Create a cache that opens sessions through `connector`.
    #[must_use]
    pub fn new(connector: Arc<dyn SessionConnector>) -> Self {
        Self {
            clients: DashMap::new(),
            create_lock: Mutex::new(()),
            connector,
        }
    }

    /// Create a cache backed by [`StreamableHttpConnector`].
    #[must_use]
    pub fn streamable_http() -> Self {
        Self::new(Arc::new(StreamableHttpConnector))
    }

    /// Return the cached client for `base_url`, connecting on first use.
    ///
    /// A failed connection leaves nothing cached; the next call retries.
    pub async fn get_or_create(&self, base_url: &str) -> Result<SearchClient, ClientError> {
        if let Some(client) = self.get(base_url) {
            return Ok(client);
        }

        let _guard = self.create_lock.lock().await;
        if let Some(client) = self.get(base_url) {
            return Ok(client);
        }

        let session = self.connector.connect(base_url).await?;
        let client = SearchClient::new(base_url, session);
        self.clients.insert(base_url.to_string(), client.clone());

        info!(name: "mcp.session.created", base_url = %base_url, "MCP client session created");
        Ok(client)
    }

    /// Cached client for `base_url`, if any.
    #[must_use]
    pub fn get(&self, base_url: &str) -> Option<SearchClient> {
        self.clients.get(base_url).map(|c| c.value().clone())
    }

    #[must_use]
    pub fn contains(&self, base_url: &str) -> bool {
        self.clients.contains_key(base_url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ClientCache {
    fn default() -> Self {
        Self::streamable_http()
    }
}
