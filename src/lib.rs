//! Web search for agents over the Model Context Protocol.
//!
//! A small MCP tool server exposing one tool, `tavily_search`, which forwards
//! a query to the Tavily search API and returns the answer plus result
//! snippets as a plain-text block. A companion client calls that tool on a
//! remote server, caching one MCP session per server URL.
//!
//! # Architecture
//!
//! - **Server**: Axum router mounting rmcp's streamable HTTP transport at `/mcp`
//! - **Search adapter**: one `POST /search` per tool call, strict result rendering
//! - **MCP client**: per-URL session cache with double-checked creation
//!
//! # Modules
//!
//! - [`search`]: Tavily request/response types, formatting and HTTP adapter
//! - [`mcp`]: tool definition, server handler and client session cache
//! - [`server`]: HTTP wiring
//! - [`config`]: CLI and layered configuration
//! - [`error`]: error taxonomy

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]

pub mod config;
pub mod error;
pub mod mcp;
pub mod search;
pub mod server;
pub mod telemetry;

pub use error::{ClientError, SearchError};
