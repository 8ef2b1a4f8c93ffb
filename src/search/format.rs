//! Rendering of search results into the tool's text output.
//!
//! The output layout is fixed:
//!
//! ```text
//! Summary of search results:
//! <answer>
//!
//! Search result details:
//! - <content 1>
//! - <content 2>
//! ```
//!
//! Rendering is strict: every template variable must be bound before any text
//! is assembled, otherwise [`SearchError::Template`] names the missing one.

use crate::error::{SearchError, SearchResult};
use crate::search::types::SearchResponse;

const SUMMARY_HEADER: &str = "Summary of search results:";
const DETAILS_HEADER: &str = "Search result details:";

/// Variables bound into the result template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    pub answer: Option<&'a str>,
    pub content: Option<Vec<&'a str>>,
}

impl<'a> TemplateContext<'a> {
    /// Bind every variable from a decoded provider response.
    #[must_use]
    pub fn from_response(response: &'a SearchResponse) -> Self {
        Self {
            answer: Some(&response.answer),
            content: Some(response.contents().collect()),
        }
    }

    /// Render the template, failing on the first unbound variable.
    pub fn render(&self) -> SearchResult<String> {
        let answer = self.answer.ok_or(SearchError::Template("answer"))?;
        let content = self
            .content
            .as_deref()
            .ok_or(SearchError::Template("content"))?;

        let mut out = String::with_capacity(64 + answer.len());
        out.push_str(SUMMARY_HEADER);
        out.push('\n');
        out.push_str(answer);
        out.push_str("\n\n");
        out.push_str(DETAILS_HEADER);
        for item in content {
            out.push_str("\n- ");
            out.push_str(item);
        }
        out.push('\n');
        Ok(out)
    }
}

/// Render a decoded provider response.
pub fn render(response: &SearchResponse) -> SearchResult<String> {
    TemplateContext::from_response(response).render()
}
