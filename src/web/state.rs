//! Application state.

use std::sync::Arc;

use crate::pipeline::InsightPipeline;

/// Shared across handlers. Holds no per-submission data.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<InsightPipeline>,
}

impl AppState {
    pub fn new(pipeline: InsightPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
