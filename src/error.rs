//! Error types for the search adapter and the MCP client.

use thiserror::Error;

/// Failure of a single `tavily_search` invocation on the server side.
///
/// Every variant is turned into a tool-level error result by the MCP handler,
/// so the calling agent sees the `Display` text, never a transport fault.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Tool arguments were missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No API credential is configured.
    #[error("tavily api key is empty")]
    Config,

    /// The request never produced a readable response.
    #[error("search request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-OK status.
    #[error("http_status_code[{status}] invalid")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode search response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A template variable was missing at render time.
    #[error("failed to render search result: missing template variable `{0}`")]
    Template(&'static str),
}

/// Failure on the client side of a remote `tavily_search` call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport creation, session start or the initialize handshake failed.
    #[error("failed to connect to MCP server at {base_url}: {reason}")]
    Connect {
        /// Base URL the session was opened against.
        base_url: String,
        /// Underlying failure.
        reason: String,
    },

    /// The `tools/call` request itself failed.
    #[error("failed to call tavily search tool: {0}")]
    Call(#[source] rmcp::ServiceError),

    /// The remote tool ran and reported an error.
    #[error("{0}")]
    RemoteTool(String),
}

/// Result alias for search adapter operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
