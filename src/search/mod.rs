pub mod tavily;

use anyhow::Result;
use async_trait::async_trait;

pub use tavily::TavilyClient;

/// Number of results requested per company lookup.
pub const MAX_RESULTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// Flattens results into the text block that is handed to the prompt.
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[Result {}] {} ({})\n{}", i + 1, r.title, r.url, r.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
