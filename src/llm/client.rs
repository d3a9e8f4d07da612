use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Completer, LlmResponse};

#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

// OpenAI-compatible chat completions format (used by Groq)
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl LlmClient {
    pub fn new(api_key: Option<&str>, base_url: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.map(|k| k.to_string()),
            base_url: base_url.to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, system_prompt: &str) -> Result<LlmResponse> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            }],
        };

        let mut builder = self
            .client
            .post(&self.base_url)
            .header("content-type", "application/json")
            .json(&request);
        // Without a key the request goes out unauthenticated and the provider rejects it.
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LLM API error ({}): {}", status, body);
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        let text = api_response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("")
            .to_string();

        if text.trim().is_empty() {
            anyhow::bail!("LLM API returned an empty completion");
        }

        let (input_tokens, output_tokens) = api_response
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(LlmResponse {
            text,
            input_tokens,
            output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> LlmClient {
        LlmClient::new(
            api_key,
            &format!("{}/openai/v1/chat/completions", server.uri()),
            "test-model",
            512,
        )
    }

    #[tokio::test]
    async fn sends_a_single_system_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer gsk_test"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "max_tokens": 512,
                "messages": [{"role": "system", "content": "analyse acme"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "## Acme\nInsights"}}],
                "usage": {"prompt_tokens": 42, "completion_tokens": 7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server, Some("gsk_test"))
            .complete("analyse acme")
            .await
            .unwrap();

        assert_eq!(response.text, "## Acme\nInsights");
        assert_eq!(response.input_tokens, 42);
        assert_eq!(response.output_tokens, 7);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .complete("analyse acme")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("401"), "{message}");
        assert!(message.contains("invalid api key"), "{message}");
    }

    #[tokio::test]
    async fn empty_completion_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": null}}]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server, Some("gsk_test"))
            .complete("analyse acme")
            .await;

        assert!(result.is_err());
    }
}
