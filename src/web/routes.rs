//! Form page handlers.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use super::markdown;
use super::state::AppState;
use crate::form::Submission;
use crate::pipeline::{Notice, PipelineOutput};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    form: Submission,
    notices: Vec<NoticeView>,
    insights_html: Option<String>,
    summary: Option<String>,
}

struct NoticeView {
    class: &'static str,
    text: String,
}

impl NoticeView {
    fn from_notice(notice: &Notice) -> Self {
        match notice {
            Notice::Info(text) => Self {
                class: "info",
                text: text.clone(),
            },
            Notice::Error(text) => Self {
                class: "error",
                text: text.clone(),
            },
        }
    }
}

impl IndexTemplate {
    fn blank() -> Self {
        Self {
            form: Submission::default(),
            notices: Vec::new(),
            insights_html: None,
            summary: None,
        }
    }

    fn with_output(output: &PipelineOutput) -> Self {
        Self {
            form: Submission::default(),
            notices: output.notices.iter().map(NoticeView::from_notice).collect(),
            insights_html: Some(markdown::to_html(output.insights.text())),
            summary: Some(output.run_log.summary()),
        }
    }
}

fn render(template: IndexTemplate) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}

/// GET / - Empty form.
pub async fn index() -> Response {
    render(IndexTemplate::blank())
}

/// POST / - Process a submission and show the insights.
pub async fn generate(State(state): State<AppState>, Form(submission): Form<Submission>) -> Response {
    // Every submit clears the form; incomplete submissions produce no result.
    match state.pipeline.submit(&submission).await {
        Some(output) => render(IndexTemplate::with_output(&output)),
        None => render(IndexTemplate::blank()),
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    "OK"
}
