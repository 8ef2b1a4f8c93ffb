//! Web search adapter.
//!
//! Translates a `(query, topic)` pair into a single Tavily API call and renders
//! the reply as a plain-text block suitable for an agent's context window.
//!
//! # Modules
//!
//! - [`types`]: request/response wire types and [`Topic`]
//! - [`format`]: strict rendering of the result template
//! - [`tavily`]: the HTTP adapter, [`TavilyClient`]
//!
//! # Example
//!
//! ```rust
//! use search_mcp::search::format::render;
//! use search_mcp::search::types::SearchResponse;
//!
//! let response: SearchResponse = serde_json::from_str(
//!     r#"{"answer": "42", "results": [{"content": "a"}, {"content": "b"}]}"#,
//! ).unwrap();
//!
//! let text = render(&response).unwrap();
//! assert_eq!(
//!     text,
//!     "Summary of search results:\n42\n\nSearch result details:\n- a\n- b\n"
//! );
//! ```

pub mod format;
pub mod tavily;
pub mod types;

pub use tavily::{TavilyClient, TavilySettings};
pub use types::{SearchRequest, SearchResponse, Topic};
