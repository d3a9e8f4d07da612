use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Timing and usage for one processed submission. Carries no form values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLog {
    pub id: String,
    pub timestamp: String,
    pub search_latency_ms: u64,
    pub num_results: u32,
    pub search_failed: bool,
    pub llm_latency_ms: u64,
    pub llm_input_tokens: u32,
    pub llm_output_tokens: u32,
    pub generation_failed: bool,
    pub total_latency_ms: u64,
}

impl RunLog {
    pub fn total_tokens(&self) -> u32 {
        self.llm_input_tokens.saturating_add(self.llm_output_tokens)
    }

    pub fn summary(&self) -> String {
        format!(
            "Search results: {} | Total latency: {:.1}s | Tokens used by LLM: {}",
            self.num_results,
            self.total_latency_ms as f64 / 1000.0,
            self.total_tokens(),
        )
    }
}

/// Appends run records to `runs.jsonl` under the configured `RUN_LOG_DIR`.
pub struct RunLogger {
    path: PathBuf,
}

impl RunLogger {
    const FILE_NAME: &'static str = "runs.jsonl";

    pub fn new(dir: &str) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create run log directory {}", dir))?;
        Ok(Self {
            path: PathBuf::from(dir).join(Self::FILE_NAME),
        })
    }

    /// Appends `run_log` as a single JSON line.
    pub fn write(&self, run_log: &RunLog) -> Result<()> {
        let mut line = serde_json::to_string(run_log).context("Failed to serialize run record")?;
        line.push('\n');

        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .with_context(|| format!("Failed to append run record to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_log(id: &str) -> RunLog {
        RunLog {
            id: id.to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            search_latency_ms: 120,
            num_results: 2,
            search_failed: false,
            llm_latency_ms: 2380,
            llm_input_tokens: 900,
            llm_output_tokens: 600,
            generation_failed: false,
            total_latency_ms: 2500,
        }
    }

    #[test]
    fn summary_reports_results_latency_and_tokens() {
        assert_eq!(
            run_log("a").summary(),
            "Search results: 2 | Total latency: 2.5s | Tokens used by LLM: 1500"
        );
    }

    #[test]
    fn token_total_saturates_on_absurd_usage() {
        let log = RunLog {
            llm_input_tokens: u32::MAX,
            llm_output_tokens: 10,
            ..run_log("huge")
        };
        assert_eq!(log.total_tokens(), u32::MAX);
    }

    #[test]
    fn appends_one_json_line_per_run() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        let logger = RunLogger::new(dir.to_str().unwrap()).unwrap();

        logger.write(&run_log("first")).unwrap();
        logger.write(&run_log("second")).unwrap();

        let contents = fs::read_to_string(dir.join("runs.jsonl")).unwrap();
        let ids: Vec<String> = contents
            .lines()
            .map(|line| serde_json::from_str::<RunLog>(line).unwrap().id)
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
