//! Wire types for the Tavily search API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of results requested from the provider on every call.
pub const MAX_RESULTS: u32 = 10;

/// Answer mode requested from the provider on every call.
pub const INCLUDE_ANSWER: &str = "advanced";

/// Search category understood by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Broad, general-purpose search.
    #[default]
    General,
    /// Real-time updates from mainstream media.
    News,
    /// Financial sources.
    Finance,
}

impl Topic {
    /// All accepted topics, in schema order.
    pub const ALL: [Topic; 3] = [Topic::General, Topic::News, Topic::Finance];

    /// Wire name of the topic.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::News => "news",
            Self::Finance => "finance",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!("unsupported topic `{s}`, expected one of: general, news, finance")
            })
    }
}

/// Outbound request body for `POST /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub topic: Topic,
    pub max_results: u32,
    pub include_answer: &'static str,
}

impl<'a> SearchRequest<'a> {
    #[must_use]
    pub fn new(query: &'a str, topic: Topic) -> Self {
        Self {
            query,
            topic,
            max_results: MAX_RESULTS,
            include_answer: INCLUDE_ANSWER,
        }
    }
}

/// Subset of the provider reply that is rendered back to the caller.
///
/// Absent or `null` fields deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    /// Result snippets in wire order.
    pub fn contents(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.content.as_str())
    }
}

/// A single search result. Only the snippet text is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SearchRequest::new("rust", Topic::News)).unwrap();
        assert_eq!(
            body,
            json!({
                "query": "rust",
                "topic": "news",
                "max_results": 10,
                "include_answer": "advanced"
            })
        );
    }

    #[test]
    fn test_topic_default_is_general() {
        assert_eq!(Topic::default(), Topic::General);
        assert_eq!("finance".parse::<Topic>().unwrap(), Topic::Finance);
        assert!("sports".parse::<Topic>().is_err());
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, SearchResponse::default());

        let resp: SearchResponse =
            serde_json::from_str(r#"{"answer": null, "results": [{"url": "x"}]}"#).unwrap();
        assert_eq!(resp.answer, "");
        assert_eq!(resp.contents().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_result_order_preserved() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "answer": "a",
            "results": [{"content": "3"}, {"content": "1"}, {"content": "2"}]
        }))
        .unwrap();
        assert_eq!(resp.contents().collect::<Vec<_>>(), vec!["3", "1", "2"]);
    }
}
