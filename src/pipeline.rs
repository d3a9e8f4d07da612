use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::form::Submission;
use crate::instrumentation::{RunLog, RunLogger};
use crate::llm::{Completer, LlmClient};
use crate::prompt::build_prompt;
use crate::search::{self, TavilyClient, WebSearch};

/// Stands in for the company data when the search call fails.
pub const SEARCH_FALLBACK: &str = "No data available.";
/// Shown instead of insights when the completion call fails.
pub const GENERATION_FALLBACK: &str = "Failed to generate insights.";

/// An inline message displayed above the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightResult {
    Generated(String),
    Failed,
}

impl InsightResult {
    pub fn text(&self) -> &str {
        match self {
            InsightResult::Generated(text) => text,
            InsightResult::Failed => GENERATION_FALLBACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub notices: Vec<Notice>,
    pub insights: InsightResult,
    pub run_log: RunLog,
}

pub struct InsightPipeline {
    search: Arc<dyn WebSearch>,
    llm: Arc<dyn Completer>,
    logger: Option<RunLogger>,
}

impl InsightPipeline {
    pub fn new(search: Arc<dyn WebSearch>, llm: Arc<dyn Completer>) -> Self {
        Self {
            search,
            llm,
            logger: None,
        }
    }

    pub fn with_run_logger(mut self, logger: RunLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let search = TavilyClient::new(config.search_api_key.as_deref(), &config.search_url);
        let llm = LlmClient::new(
            config.llm_api_key.as_deref(),
            &config.llm_base_url,
            &config.llm_model,
            config.llm_max_tokens,
        );
        if config.llm_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY is not set; insight generation will fail");
        }

        let mut pipeline = Self::new(Arc::new(search), Arc::new(llm));
        if let Some(dir) = &config.run_log_dir {
            pipeline = pipeline.with_run_logger(RunLogger::new(dir)?);
        }
        Ok(pipeline)
    }

    /// Runs the pipeline when both required fields are present, otherwise does nothing.
    pub async fn submit(&self, submission: &Submission) -> Option<PipelineOutput> {
        if !submission.is_ready() {
            tracing::debug!("submission skipped: product name or company URL missing");
            return None;
        }
        Some(self.run(submission).await)
    }

    /// Search, build the prompt, generate. Never fails: each remote error
    /// becomes a notice plus a fallback value.
    pub async fn run(&self, submission: &Submission) -> PipelineOutput {
        let run_start = Instant::now();
        let mut notices = Vec::new();

        let search_start = Instant::now();
        let (company_information, num_results, search_failed) = match self
            .search
            .search(&submission.company_url, search::MAX_RESULTS)
            .await
        {
            Ok(results) => {
                let text = search::format_results(&results);
                notices.push(Notice::Info(format!("Company Data Retrieved: {}", text)));
                (text, results.len(), false)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(error = %message, "company search failed");
                notices.push(Notice::Error(format!("Error fetching company data: {}", message)));
                (SEARCH_FALLBACK.to_string(), 0, true)
            }
        };
        let search_latency = search_start.elapsed().as_millis() as u64;

        let prompt = build_prompt(submission, &company_information);

        let llm_start = Instant::now();
        let (insights, input_tokens, output_tokens) = match self.llm.complete(&prompt).await {
            Ok(response) => (
                InsightResult::Generated(response.text),
                response.input_tokens,
                response.output_tokens,
            ),
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(error = %message, "insight generation failed");
                notices.push(Notice::Error(format!("Error generating insights: {}", message)));
                (InsightResult::Failed, 0, 0)
            }
        };
        let llm_latency = llm_start.elapsed().as_millis() as u64;

        let run_log = RunLog {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            search_latency_ms: search_latency,
            num_results: num_results as u32,
            search_failed,
            llm_latency_ms: llm_latency,
            llm_input_tokens: input_tokens,
            llm_output_tokens: output_tokens,
            generation_failed: insights == InsightResult::Failed,
            total_latency_ms: run_start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            run_id = %run_log.id,
            search_ms = search_latency,
            llm_ms = llm_latency,
            num_results,
            search_failed,
            generation_failed = run_log.generation_failed,
            "submission processed"
        );

        if let Some(logger) = &self.logger {
            if let Err(e) = logger.write(&run_log) {
                tracing::warn!(error = %e, "failed to write run log");
            }
        }

        PipelineOutput {
            notices,
            insights,
            run_log,
        }
    }
}
