use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Left unchecked at startup; a missing key surfaces as a generation failure.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub search_api_key: Option<String>,
    pub search_url: String,
    pub host: String,
    pub port: u16,
    pub run_log_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            llm_api_key: non_empty_var("GROQ_API_KEY"),
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1/chat/completions".into()),
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".into()),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS")
                .unwrap_or_else(|_| "4096".into())
                .parse()
                .context("LLM_MAX_TOKENS must be a number")?,
            search_api_key: non_empty_var("TAVILY_API_KEY"),
            search_url: std::env::var("SEARCH_URL")
                .unwrap_or_else(|_| "https://api.tavily.com/search".into()),
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8501".into())
                .parse()
                .context("PORT must be a port number")?,
            run_log_dir: non_empty_var("RUN_LOG_DIR"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
