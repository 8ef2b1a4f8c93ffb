//! Tavily search API adapter.
//!
//! One [`TavilyClient::search`] call performs exactly one `POST /search`
//! request and renders the reply with [`format::render`](super::format::render).

use std::fmt;
use std::time::Instant;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::error::{SearchError, SearchResult};
use crate::search::format;
use crate::search::types::{SearchRequest, SearchResponse, Topic};

/// Default Tavily API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Environment variable holding the Tavily API key.
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Connection settings for the Tavily API.
#[derive(Clone)]
pub struct TavilySettings {
    /// Base URL, without the `/search` path.
    pub base_url: String,
    /// Bearer token. `None` makes every search fail with [`SearchError::Config`].
    pub api_key: Option<String>,
}

impl fmt::Debug for TavilySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilySettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for TavilySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl TavilySettings {
    /// Build settings for `base_url`, reading the key from [`API_KEY_ENV`].
    ///
    /// An absent or blank key is kept as `None` rather than failing here.
    #[must_use]
    pub fn from_env(base_url: impl Into<String>) -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Replace the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|s| !s.trim().is_empty());
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP client for the Tavily search endpoint.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    settings: TavilySettings,
}

impl TavilyClient {
    #[must_use]
    pub fn new(settings: TavilySettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Run one search and render the result text.
    pub async fn search(&self, query: &str, topic: Topic) -> SearchResult<String> {
        let api_key = self.settings.api_key.as_deref().ok_or(SearchError::Config)?;
        if query.trim().is_empty() {
            return Err(SearchError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }

        let started = Instant::now();
        info!(
            name: "search.request",
            topic = %topic,
            query_length = query.len(),
            "Sending search request"
        );

        let response = self
            .http
            .post(self.settings.search_url())
            .bearer_auth(api_key)
            .json(&SearchRequest::new(query, topic))
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                name: "search.failed",
                status = status.as_u16(),
                "Search provider returned non-OK status"
            );
            return Err(SearchError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(SearchError::Transport)?;
        let decoded: SearchResponse = serde_json::from_slice(&body).map_err(SearchError::Decode)?;
        debug!(
            result_count = decoded.results.len(),
            answer_length = decoded.answer.len(),
            "Decoded search response"
        );

        let text = format::render(&decoded)?;
        info!(
            name: "search.completed",
            elapsed_ms = started.elapsed().as_millis() as u64,
            result_count = decoded.results.len(),
            "Search completed"
        );
        Ok(text)
    }
}
