//! The `tavily_search` tool: its MCP definition and its invocation bridge.
//!
//! [`SearchTool::call`] never fails at the protocol level. Argument problems
//! and every [`SearchError`] from the adapter come back as a tool result with
//! `is_error` set, so the calling agent can read the message and react.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::{SearchError, SearchResult};
use crate::search::{TavilyClient, Topic};

/// Name the tool is registered under.
pub const TAVILY_SEARCH_TOOL: &str = "tavily_search";

/// Argument key for the search text.
pub const QUERY_KEY: &str = "query";

/// Argument key for the search category.
pub const TOPIC_KEY: &str = "topic";

const TOOL_DESCRIPTION: &str = "A search engine API optimized for Large Language Model (LLM) and \
Retrieval-Augmented Generation (RAG) applications, designed to efficiently and quickly provide \
real-time, accurate, and relevant web search results to enhance the information acquisition and \
processing capabilities of AI agents.";

const TOPIC_DESCRIPTION: &str = "The category of the search. Available options: general, news, \
finance. news is useful for retrieving real-time updates, particularly about politics, sports, \
and major current events covered by mainstream media sources. general is for broader, more \
general-purpose searches that may include a wide range of sources.";

/// JSON schema for the tool input.
pub fn input_schema() -> JsonObject {
    let topics: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "properties".to_string(),
        json!({
            QUERY_KEY: {
                "type": "string",
                "description": "To search for content"
            },
            TOPIC_KEY: {
                "type": "string",
                "description": TOPIC_DESCRIPTION,
                "enum": topics,
                "default": Topic::default().as_str()
            }
        }),
    );
    schema.insert("required".to_string(), json!([QUERY_KEY]));
    schema
}

/// MCP definition advertised in `tools/list`.
pub fn tavily_search_tool() -> Tool {
    Tool::new(TAVILY_SEARCH_TOOL, TOOL_DESCRIPTION, Arc::new(input_schema()))
}

/// Bridges MCP tool calls to the [`TavilyClient`].
#[derive(Debug, Clone)]
pub struct SearchTool {
    client: Arc<TavilyClient>,
}

impl SearchTool {
    #[must_use]
    pub fn new(client: Arc<TavilyClient>) -> Self {
        Self { client }
    }

    /// Handle one `tools/call` request for this tool.
    pub async fn call(&self, arguments: Option<&JsonObject>) -> CallToolResult {
        match self.run(arguments).await {
            Ok(text) => {
                info!(
                    name: "mcp.tool.called",
                    tool = TAVILY_SEARCH_TOOL,
                    success = true,
                    "Tool call finished"
                );
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                warn!(
                    name: "mcp.tool.called",
                    tool = TAVILY_SEARCH_TOOL,
                    success = false,
                    error = %e,
                    "Tool call failed"
                );
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    async fn run(&self, arguments: Option<&JsonObject>) -> SearchResult<String> {
        let (query, topic) = parse_arguments(arguments)?;
        self.client.search(query, topic).await
    }
}

/// Extract `query` and `topic` from raw tool arguments.
///
/// A missing, `null` or empty `topic` means [`Topic::General`].
pub fn parse_arguments(arguments: Option<&JsonObject>) -> SearchResult<(&str, Topic)> {
    let invalid = |msg: String| SearchError::InvalidArgument(msg);

    let query = match arguments.and_then(|a| a.get(QUERY_KEY)) {
        Some(Value::String(q)) if !q.trim().is_empty() => q.as_str(),
        Some(Value::String(_)) => {
            return Err(invalid(format!("argument \"{QUERY_KEY}\" must not be empty")));
        }
        Some(_) => {
            return Err(invalid(format!("argument \"{QUERY_KEY}\" is not a string")));
        }
        None => {
            return Err(invalid(format!("required argument \"{QUERY_KEY}\" not found")));
        }
    };

    let topic = match arguments.and_then(|a| a.get(TOPIC_KEY)) {
        None | Some(Value::Null) => Topic::default(),
        Some(Value::String(t)) if t.is_empty() => Topic::default(),
        Some(Value::String(t)) => t.parse().map_err(invalid)?,
        Some(_) => {
            return Err(invalid(format!("argument \"{TOPIC_KEY}\" is not a string")));
        }
    };

    Ok((query, topic))
}
