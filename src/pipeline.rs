//! The fetch-and-extract stage and the search operation collaborators call.
//!
//! [`search`] is the single entry point: discover candidates, scrape each
//! one sequentially, and assemble the report. Fetches are deliberately not
//! parallelized — the point is to bound the outbound request *rate*, not
//! just the count, and a randomized pause separates consecutive fetches.
//! One bad URL never aborts the batch; it becomes a failed document and the
//! batch moves on.
//!
//! [`search_with_deadline`] wraps the whole call in a timeout. When the
//! deadline fires, the in-flight work is dropped on the floor: partially
//! collected documents are discarded rather than rendered into an
//! incomplete report.

use crate::client::{HttpFetch, Pause};
use crate::discovery;
use crate::error::ScoutError;
use crate::extract;
use crate::models::{CandidateUrl, ScrapedDocument, SearchQuery, SearchReport};
use crate::sanitize;
use futures::stream::{self, StreamExt};
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Run a complete search: discovery, sequential scraping, report assembly.
///
/// Never fails; every degradation path ends in a report, possibly with zero
/// documents.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, limit = query.limit))]
pub async fn search<C: HttpFetch, P: Pause>(
    client: &C,
    pause: &P,
    query: &SearchQuery,
) -> SearchReport {
    let candidates = discovery::discover(client, query).await;
    if candidates.is_empty() {
        info!("No validated candidates discovered");
        return SearchReport::build(query, Vec::new());
    }

    let documents = scrape_documents(client, pause, &candidates, query.limit).await;
    let report = SearchReport::build(query, documents);
    info!(
        documents = report.documents.len(),
        total_words = report.total_words,
        "Search complete"
    );
    report
}

/// [`search`], bounded by a caller-supplied deadline. On expiry the
/// in-flight fetch is abandoned and no further work is attempted.
pub async fn search_with_deadline<C: HttpFetch, P: Pause>(
    client: &C,
    pause: &P,
    query: &SearchQuery,
    deadline: Duration,
) -> Result<SearchReport, ScoutError> {
    tokio::time::timeout(deadline, search(client, pause, query))
        .await
        .map_err(|_| ScoutError::DeadlineExceeded)
}

/// Fetch and extract each candidate in discovery order, one at a time,
/// pausing between consecutive attempts. Every attempt yields a
/// [`ScrapedDocument`], successful or failed.
#[instrument(level = "info", skip_all, fields(candidates = candidates.len()))]
pub async fn scrape_documents<C: HttpFetch, P: Pause>(
    client: &C,
    pause: &P,
    candidates: &[CandidateUrl],
    limit: usize,
) -> Vec<ScrapedDocument> {
    let documents: Vec<ScrapedDocument> = stream::iter(candidates.iter().take(limit).enumerate())
        .then(|(i, candidate)| async move {
            if i > 0 {
                pause.pause().await;
            }
            scrape_one(client, candidate).await
        })
        .collect()
        .await;

    let successful = documents.iter().filter(|d| d.success).count();
    info!(
        total = documents.len(),
        successful,
        failed = documents.len() - successful,
        "Scraping pass complete"
    );
    documents
}

async fn scrape_one<C: HttpFetch>(client: &C, candidate: &CandidateUrl) -> ScrapedDocument {
    let url = &candidate.url;
    let page = match client.get(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!(%url, error = %e, "Fetch failed");
            return ScrapedDocument::failed(url.clone(), e.to_string());
        }
    };
    if !page.is_success() {
        warn!(%url, status = page.status, "Fetch returned non-success status");
        return ScrapedDocument::failed(url.clone(), format!("HTTP status {}", page.status));
    }
    if page.final_url != *url {
        debug!(%url, final_url = %page.final_url, "Request was redirected");
    }

    let document = Html::parse_document(&page.body);
    let extraction = extract::extract(&document);
    let body = sanitize::clean(&extraction.body);
    let scraped = ScrapedDocument::fetched(extraction.title, body, url.clone(), extraction.published);

    if scraped.success {
        info!(%url, title = %scraped.title, words = scraped.word_count, "Scraped document");
    } else {
        warn!(%url, reason = ?scraped.failure, "Document rejected");
    }
    scraped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockFetch;
    use crate::client::NoPause;
    use crate::discovery::{engine, site_search};
    use crate::models::RecencyWindow;
    use crate::report;
    use chrono::{Datelike, Local};

    const TOPIC: &str = "test topic";

    fn query(limit: usize) -> SearchQuery {
        SearchQuery::new(TOPIC, limit, RecencyWindow::Week).unwrap()
    }

    fn article_page(title: &str, sentences: usize) -> String {
        let body = "A reasonably long sentence of article text to extract. ".repeat(sentences);
        format!(
            r#"<html><head><title>{title}</title></head>
            <body><article><h1 class="entry-title">{title}</h1>
            <time datetime="2025-06-01T09:00:00Z">June 1</time>
            <p>{body}</p></article></body></html>"#
        )
    }

    /// Engine yields one article URL; the first search site yields a second.
    fn two_source_mock(alpha_url: &str, beta_url: &str) -> MockFetch {
        let engine_page = format!(r#"<html><body><a href="{alpha_url}">Alpha</a></body></html>"#);
        let site_page = format!(r#"<html><body><a href="{beta_url}">Beta</a></body></html>"#);
        MockFetch::new()
            .page(&engine::search_url(TOPIC), &engine_page)
            .page(&site_search::search_url(&site_search::SITES[0], TOPIC), &site_page)
    }

    #[tokio::test]
    async fn test_search_collects_from_multiple_strategies() {
        let year = Local::now().year();
        let alpha = "https://example.com/news/alpha-story".to_string();
        let beta = format!("https://techcrunch.com/{year}/01/15/beta-story");

        let mock = two_source_mock(&alpha, &beta)
            .page(&alpha, &article_page("Alpha Headline", 10))
            .page(&beta, &article_page("Beta Headline", 12));

        let report = search(&mock, &NoPause, &query(2)).await;
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.documents[0].url, alpha);
        assert_eq!(report.documents[1].url, beta);
        assert_eq!(
            report.total_words,
            report.documents[0].word_count + report.documents[1].word_count
        );

        let rendered = report::render_markdown(&report);
        assert!(rendered.contains("Alpha Headline"));
        assert!(rendered.contains("Beta Headline"));
        assert!(rendered.contains(&alpha));
        assert!(rendered.contains(&beta));
    }

    #[tokio::test]
    async fn test_search_skips_failed_fetch_and_keeps_rest() {
        let year = Local::now().year();
        let alpha = "https://example.com/news/alpha-story".to_string();
        let beta = format!("https://techcrunch.com/{year}/01/15/beta-story");

        // Beta's article page is never registered, so its fetch times out.
        let mock = two_source_mock(&alpha, &beta).page(&alpha, &article_page("Alpha Headline", 10));

        let report = search(&mock, &NoPause, &query(2)).await;
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].url, alpha);

        let rendered = report::render_markdown(&report);
        assert!(rendered.contains(&alpha));
        assert!(!rendered.contains(&beta));
    }

    #[tokio::test]
    async fn test_search_never_exceeds_limit() {
        let links: String = (0..6)
            .map(|i| format!(r#"<a href="https://example.com/news/story-{i}">r</a>"#))
            .collect();
        let mut mock = MockFetch::new().page(
            &engine::search_url(TOPIC),
            &format!("<html><body>{links}</body></html>"),
        );
        for i in 0..6 {
            mock = mock.page(
                &format!("https://example.com/news/story-{i}"),
                &article_page(&format!("Story {i}"), 10),
            );
        }

        let report = search(&mock, &NoPause, &query(1)).await;
        assert_eq!(report.documents.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_discovery_yields_no_results_report() {
        let mock = MockFetch::new();
        let report = search(&mock, &NoPause, &query(3)).await;
        assert!(report.documents.is_empty());

        let rendered = report::render_markdown(&report);
        assert!(rendered.contains(report::NO_RESULTS_MARKER));
        assert!(rendered.contains(TOPIC));
    }

    #[tokio::test]
    async fn test_short_content_marked_failed() {
        let alpha = "https://example.com/news/alpha-story";
        let engine_page = format!(r#"<html><body><a href="{alpha}">Alpha</a></body></html>"#);
        // The page parses fine but carries almost no text.
        let thin = r#"<html><body><article><p>barely anything here</p></article></body></html>"#;
        let mock = MockFetch::new()
            .page(&engine::search_url(TOPIC), &engine_page)
            .page(alpha, thin);

        let candidates = discovery::discover(&mock, &query(1)).await;
        let documents = scrape_documents(&mock, &NoPause, &candidates, 1).await;
        assert_eq!(documents.len(), 1);
        assert!(!documents[0].success);
        assert_eq!(documents[0].failure.as_deref(), Some("content too short"));

        let report = SearchReport::build(&query(1), documents);
        assert!(report.documents.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_recorded_as_failure() {
        let url = "https://example.com/news/gone".to_string();
        let candidates = vec![CandidateUrl {
            url: url.clone(),
            strategy: crate::models::StrategyKind::EngineResults,
            valid: true,
        }];
        let mock = MockFetch::new().status(&url, 404, "not found");

        let documents = scrape_documents(&mock, &NoPause, &candidates, 5).await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].failure.as_deref(), Some("HTTP status 404"));
    }

    struct SlowPause;

    impl Pause for SlowPause {
        async fn pause(&self) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    }

    #[tokio::test]
    async fn test_deadline_discards_partial_work() {
        let links: String = (0..2)
            .map(|i| format!(r#"<a href="https://example.com/news/story-{i}">r</a>"#))
            .collect();
        let mut mock = MockFetch::new().page(
            &engine::search_url(TOPIC),
            &format!("<html><body>{links}</body></html>"),
        );
        for i in 0..2 {
            mock = mock.page(
                &format!("https://example.com/news/story-{i}"),
                &article_page(&format!("Story {i}"), 10),
            );
        }

        // The pause between the two fetches outlasts the deadline.
        let result =
            search_with_deadline(&mock, &SlowPause, &query(2), Duration::from_millis(100)).await;
        assert!(matches!(result, Err(ScoutError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_deadline_passes_through_completed_search() {
        let mock = MockFetch::new();
        let report =
            search_with_deadline(&mock, &NoPause, &query(2), Duration::from_secs(30)).await;
        assert!(report.unwrap().documents.is_empty());
    }
}
