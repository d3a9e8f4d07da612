pub mod client;

use anyhow::Result;
use async_trait::async_trait;

pub use client::LlmClient;

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A hosted model that turns one system-role instruction into text.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, system_prompt: &str) -> Result<LlmResponse>;
}
