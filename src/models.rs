//! Data models for search queries, discovered URLs, and scraped articles.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`SearchQuery`]: A validated topic search request
//! - [`RecencyWindow`]: How recent discovered content should be
//! - [`CandidateUrl`]: A URL produced by a discovery strategy, pre-fetch
//! - [`ScrapedDocument`]: One fetch attempt's outcome, successful or not
//! - [`SearchReport`]: The terminal artifact handed to the caller
//!
//! A query is immutable once constructed; the validating constructor is the
//! only way to build one, so invalid limits are rejected before any network
//! activity happens.

use crate::error::ScoutError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of documents a single search may return.
pub const MAX_RESULTS: usize = 10;

/// Minimum cleaned body length (in characters) for a document to count as
/// successfully scraped. Shorter bodies are recorded as failures.
pub const MIN_CONTENT_CHARS: usize = 100;

/// How recent discovered content should be.
///
/// The window is carried on the query and logged at dispatch time. URL-level
/// recency filtering uses an independent current-or-prior-year heuristic;
/// the two signals are deliberately kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecencyWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RecencyWindow {
    /// The search-engine style token this window abbreviates (`qdr:h` .. `qdr:y`).
    pub fn search_token(&self) -> &'static str {
        match self {
            RecencyWindow::Hour => "qdr:h",
            RecencyWindow::Day => "qdr:d",
            RecencyWindow::Week => "qdr:w",
            RecencyWindow::Month => "qdr:m",
            RecencyWindow::Year => "qdr:y",
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecencyWindow::Hour => "hour",
            RecencyWindow::Day => "day",
            RecencyWindow::Week => "week",
            RecencyWindow::Month => "month",
            RecencyWindow::Year => "year",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RecencyWindow {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(RecencyWindow::Hour),
            "day" => Ok(RecencyWindow::Day),
            "week" => Ok(RecencyWindow::Week),
            "month" => Ok(RecencyWindow::Month),
            "year" => Ok(RecencyWindow::Year),
            other => Err(ScoutError::InvalidRecency(other.to_string())),
        }
    }
}

/// A validated topic search request.
///
/// Construct through [`SearchQuery::new`], which rejects out-of-range limits
/// with [`ScoutError::InvalidLimit`] before any network activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text topic to research.
    pub topic: String,
    /// Maximum number of documents to return (1 through [`MAX_RESULTS`]).
    pub limit: usize,
    /// Caller-requested recency window.
    pub recency: RecencyWindow,
}

impl SearchQuery {
    pub fn new(
        topic: impl Into<String>,
        limit: usize,
        recency: RecencyWindow,
    ) -> Result<Self, ScoutError> {
        if limit == 0 || limit > MAX_RESULTS {
            return Err(ScoutError::InvalidLimit {
                got: limit,
                max: MAX_RESULTS,
            });
        }
        Ok(Self {
            topic: topic.into(),
            limit,
            recency,
        })
    }
}

/// Which discovery strategy produced a candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// General search-engine result parsing.
    EngineResults,
    /// Constructed per-site search URLs on known publications.
    SiteSearch,
    /// Direct crawl of fixed category/listing pages.
    Listing,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StrategyKind::EngineResults => "engine_results",
            StrategyKind::SiteSearch => "site_search",
            StrategyKind::Listing => "listing",
        };
        write!(f, "{s}")
    }
}

/// A URL produced by a discovery strategy, not yet fetched.
///
/// Identity is the URL string after redirect decoding (engine results) or
/// base-join normalization (site search, listings); the dispatcher dedupes
/// on it with first-occurrence-wins semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateUrl {
    pub url: String,
    pub strategy: StrategyKind,
    /// Set by the validator during the dispatcher merge.
    pub valid: bool,
}

/// The outcome of one fetch-and-extract attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedDocument {
    /// Extracted headline, or `"Untitled Article"` when nothing matched.
    pub title: String,
    /// Cleaned article text.
    pub body: String,
    /// The URL the document was fetched from.
    pub url: String,
    /// Best-effort publish date (`YYYY-MM-DD` when parseable).
    pub published: String,
    /// Whitespace-separated word count of `body`.
    pub word_count: usize,
    /// True iff `body` meets [`MIN_CONTENT_CHARS`].
    pub success: bool,
    /// Failure reason when `success` is false.
    pub failure: Option<String>,
}

impl ScrapedDocument {
    /// Build a document from extracted content, deriving the word count and
    /// success flag from the cleaned body.
    pub fn fetched(title: String, body: String, url: String, published: String) -> Self {
        let success = body.chars().count() >= MIN_CONTENT_CHARS;
        let failure = if success {
            None
        } else {
            Some("content too short".to_string())
        };
        let word_count = body.split_whitespace().count();
        Self {
            title,
            body,
            url,
            published,
            word_count,
            success,
            failure,
        }
    }

    /// Record a fetch that produced no usable page at all.
    pub fn failed(url: String, reason: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            url,
            published: String::new(),
            word_count: 0,
            success: false,
            failure: Some(reason.into()),
        }
    }
}

/// The terminal artifact of a search: every successfully scraped document,
/// in fetch order, plus aggregates. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub topic: String,
    pub recency: RecencyWindow,
    /// Successful documents only, preserving fetch order.
    pub documents: Vec<ScrapedDocument>,
    /// Sum of `word_count` over `documents`.
    pub total_words: usize,
    /// Local timestamp the report was generated at, `YYYY-MM-DD HH:MM:SS`.
    pub generated_at: String,
}

impl SearchReport {
    /// Assemble a report from the fetch stage's output, keeping only the
    /// documents that succeeded.
    pub fn build(query: &SearchQuery, documents: Vec<ScrapedDocument>) -> Self {
        let documents: Vec<ScrapedDocument> =
            documents.into_iter().filter(|d| d.success).collect();
        let total_words = documents.iter().map(|d| d.word_count).sum();
        Self {
            topic: query.topic.clone(),
            recency: query.recency,
            documents,
            total_words,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: usize) -> SearchQuery {
        SearchQuery::new("test topic", limit, RecencyWindow::Week).unwrap()
    }

    #[test]
    fn test_query_rejects_zero_limit() {
        let err = SearchQuery::new("ai", 0, RecencyWindow::Week).unwrap_err();
        assert!(matches!(err, ScoutError::InvalidLimit { got: 0, .. }));
    }

    #[test]
    fn test_query_rejects_limit_over_max() {
        let err = SearchQuery::new("ai", MAX_RESULTS + 1, RecencyWindow::Day).unwrap_err();
        assert!(matches!(err, ScoutError::InvalidLimit { got: 11, .. }));
    }

    #[test]
    fn test_query_accepts_bounds() {
        assert!(SearchQuery::new("ai", 1, RecencyWindow::Hour).is_ok());
        assert!(SearchQuery::new("ai", MAX_RESULTS, RecencyWindow::Year).is_ok());
    }

    #[test]
    fn test_recency_from_str() {
        assert_eq!("week".parse::<RecencyWindow>().unwrap(), RecencyWindow::Week);
        assert_eq!("HOUR".parse::<RecencyWindow>().unwrap(), RecencyWindow::Hour);
        assert!("fortnight".parse::<RecencyWindow>().is_err());
    }

    #[test]
    fn test_recency_search_token() {
        assert_eq!(RecencyWindow::Week.search_token(), "qdr:w");
        assert_eq!(RecencyWindow::Hour.search_token(), "qdr:h");
    }

    #[test]
    fn test_document_success_threshold() {
        let body_99 = "x".repeat(MIN_CONTENT_CHARS - 1);
        let doc = ScrapedDocument::fetched(
            "Title".into(),
            body_99,
            "https://example.com/news/a".into(),
            "2025-01-01".into(),
        );
        assert!(!doc.success);
        assert_eq!(doc.failure.as_deref(), Some("content too short"));

        let body_100 = "y".repeat(MIN_CONTENT_CHARS);
        let doc = ScrapedDocument::fetched(
            "Title".into(),
            body_100,
            "https://example.com/news/a".into(),
            "2025-01-01".into(),
        );
        assert!(doc.success);
        assert!(doc.failure.is_none());
    }

    #[test]
    fn test_word_count_derived_from_body() {
        let doc = ScrapedDocument::fetched(
            "Title".into(),
            "one two three".into(),
            "https://example.com/news/a".into(),
            "2025-01-01".into(),
        );
        assert_eq!(doc.word_count, 3);
    }

    #[test]
    fn test_report_build_filters_failures_and_sums_words() {
        let ok = ScrapedDocument::fetched(
            "Kept".into(),
            "word ".repeat(40),
            "https://example.com/news/kept".into(),
            "2025-01-01".into(),
        );
        let bad = ScrapedDocument::failed("https://example.com/news/bad".into(), "timeout");
        let words = ok.word_count;

        let report = SearchReport::build(&query(5), vec![ok, bad]);
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].title, "Kept");
        assert_eq!(report.total_words, words);
    }

    #[test]
    fn test_report_serialization() {
        let report = SearchReport::build(&query(3), vec![]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"topic\":\"test topic\""));
        assert!(json.contains("\"recency\":\"week\""));
    }
}
