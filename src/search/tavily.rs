use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchResult, WebSearch};

pub struct TavilyClient {
    client: reqwest::Client,
    api_key: Option<String>,
    url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

impl TavilyClient {
    pub fn new(api_key: Option<&str>, url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.map(|k| k.to_string()),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("TAVILY_API_KEY is not set")?;

        let request = SearchRequest {
            query,
            max_results,
            search_depth: "basic",
            include_answer: false,
            include_raw_content: false,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to search API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Search API error ({}): {}", status, body);
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search API response")?;

        let results = search_response
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_query_with_result_cap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("authorization", "Bearer tvly-test"))
            .and(body_partial_json(json!({
                "query": "https://acme.example",
                "max_results": 2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "https://acme.example",
                "results": [
                    {"title": "Acme", "url": "https://acme.example", "content": "Acme makes anvils.", "score": 0.9},
                    {"title": "Acme news", "url": "https://news.example/acme", "content": "Acme hires a CDO.", "score": 0.8},
                    {"title": "Extra", "url": "https://extra.example", "content": "ignored", "score": 0.1}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TavilyClient::new(Some("tvly-test"), &format!("{}/search", server.uri()));
        let results = client.search("https://acme.example", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://acme.example");
        assert_eq!(results[1].content, "Acme hires a CDO.");
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = TavilyClient::new(None, &format!("{}/search", server.uri()));
        let err = client.search("acme.example", 2).await.unwrap_err();

        assert!(err.to_string().contains("TAVILY_API_KEY"));
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(432).set_body_string("usage limit exceeded"))
            .mount(&server)
            .await;

        let client = TavilyClient::new(Some("tvly-test"), &format!("{}/search", server.uri()));
        let err = client.search("acme.example", 2).await.unwrap_err();

        assert!(err.to_string().contains("usage limit exceeded"));
    }
}
