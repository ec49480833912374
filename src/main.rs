//! # News Scout
//!
//! A web research pipeline that discovers recent news articles about a
//! topic, scrapes and cleans their content, and assembles a structured
//! markdown report (with optional JSON output).
//!
//! ## Features
//!
//! - Three independent discovery strategies run in priority order: search
//!   engine results, per-site search on known publications, and direct
//!   category/listing pages
//! - URL validation and deduplication before any article is fetched
//! - Cascading selector heuristics for title, body, and publish date
//! - Boilerplate stripping and sentence-aware bounding of article text
//! - Sequential, jitter-delayed fetching to keep the request rate polite
//!
//! ## Usage
//!
//! ```sh
//! news_scout "open source llm releases" -l 5 -r week
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Discovery**: Collect candidate URLs from each strategy until the
//!    limit is reached
//! 2. **Validation**: Deduplicate and gate candidates through the URL
//!    validator
//! 3. **Scraping**: Fetch each candidate sequentially, extract and sanitize
//!    its content
//! 4. **Output**: Render the markdown report and optional JSON file

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod client;
mod config;
mod discovery;
mod error;
mod extract;
mod models;
mod pipeline;
mod report;
mod sanitize;
mod validator;

use cli::Cli;
use client::{HttpClient, JitterPause};
use config::ScoutConfig;
use models::SearchQuery;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_scout starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.topic, args.limit, ?args.recency, "Parsed CLI arguments");

    // --- Load configuration ---
    let config = match &args.config {
        Some(path) => ScoutConfig::load(path).await?,
        None => ScoutConfig::default(),
    };

    // Invalid limits are rejected here, before any network activity.
    let query = SearchQuery::new(args.topic, args.limit, args.recency)?;

    // ---- Run the search ----
    // Each invocation gets its own client, so nothing is shared if a host
    // process ever runs several searches side by side.
    let http = HttpClient::new(&config)?;
    let pause = JitterPause::from_config(&config);

    let search_report = match args.deadline_secs {
        Some(secs) => {
            pipeline::search_with_deadline(&http, &pause, &query, Duration::from_secs(secs)).await?
        }
        None => pipeline::search(&http, &pause, &query).await,
    };

    info!(
        documents = search_report.documents.len(),
        total_words = search_report.total_words,
        "Report assembled"
    );

    // ---- Output ----
    let rendered = report::render_markdown(&search_report);
    match &args.output {
        Some(path) => {
            info!(path = %path, "Writing markdown report");
            tokio::fs::write(path, &rendered).await?;
        }
        None => println!("{rendered}"),
    }

    if let Some(path) = &args.json_output {
        let json = serde_json::to_string_pretty(&search_report)?;
        info!(path = %path, "Writing JSON report");
        if let Err(e) = tokio::fs::write(path, json).await {
            error!(path = %path, error = %e, "Failed writing JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
