//! Command-line interface definitions for News Scout.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use crate::models::RecencyWindow;
use clap::Parser;

/// Command-line arguments for the News Scout application.
///
/// # Examples
///
/// ```sh
/// # Research a topic with the defaults (5 articles, past week)
/// news_scout "open source llm releases"
///
/// # Tighter search written to files
/// news_scout "rust embedded tooling" -l 3 -r month -o report.md --json-output report.json
///
/// # Bound the whole run to two minutes
/// news_scout "chip export controls" --deadline-secs 120
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic to research
    pub topic: String,

    /// Maximum number of articles to include (1-10)
    #[arg(short, long, default_value_t = 5)]
    pub limit: usize,

    /// How recent discovered content should be
    #[arg(short, long, value_enum, default_value_t = RecencyWindow::Week)]
    pub recency: RecencyWindow,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_SCOUT_CONFIG")]
    pub config: Option<String>,

    /// Write the markdown report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write the report as JSON to this file
    #[arg(long)]
    pub json_output: Option<String>,

    /// Abandon the search after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,
}
