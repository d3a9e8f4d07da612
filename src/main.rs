mod config;
mod form;
mod instrumentation;
mod llm;
mod pipeline;
mod prompt;
mod search;
mod web;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;

use config::Config;
use form::Submission;
use pipeline::{InsightPipeline, Notice, PipelineOutput};

#[derive(Parser)]
#[command(
    name = "insight-agent",
    about = "Company insight generator backed by web search and a hosted LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print retrieved company data and the run summary
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the insight form over HTTP
    Serve {
        /// Interface to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate insights for one submission and print them
    Ask {
        #[arg(long, default_value = "")]
        product_name: String,
        #[arg(long, default_value = "")]
        company_url: String,
        #[arg(long, default_value = "")]
        product_category: String,
        #[arg(long, default_value = "")]
        competitors_url: String,
        #[arg(long, default_value = "")]
        value_proposition: String,
        #[arg(long, default_value = "")]
        target_customer: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pipeline = InsightPipeline::from_config(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.host);
            let port = port.unwrap_or(config.port);
            web::run_server(pipeline, &host, port).await?;
        }
        Commands::Ask {
            product_name,
            company_url,
            product_category,
            competitors_url,
            value_proposition,
            target_customer,
        } => {
            let submission = Submission {
                product_name,
                company_url,
                product_category,
                competitors_url,
                value_proposition,
                target_customer,
            };

            let output = pipeline.submit(&submission).await;
            write_ask_output(
                output.as_ref(),
                cli.verbose,
                &mut std::io::stdout().lock(),
                &mut std::io::stderr().lock(),
            )?;
        }
    }

    Ok(())
}

/// Prints the result of `ask`. A skipped submission prints nothing.
fn write_ask_output(
    output: Option<&PipelineOutput>,
    verbose: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<()> {
    let Some(output) = output else {
        return Ok(());
    };

    for notice in &output.notices {
        match notice {
            Notice::Info(text) if verbose => writeln!(err, "{}", text)?,
            Notice::Info(_) => {}
            Notice::Error(text) => writeln!(err, "{}", text)?,
        }
    }

    writeln!(out, "\n{}\n", output.insights.text())?;
    if verbose {
        writeln!(out, "{}", output.run_log.summary())?;
    }
    Ok(())
}
