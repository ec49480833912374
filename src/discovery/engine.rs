//! Search-engine result strategy.
//!
//! Issues a single query to DuckDuckGo's HTML endpoint and scans the result
//! markup for links. Most result hrefs are indirection links that carry the
//! true destination percent-encoded in a query parameter; those are decoded
//! back to the real URL. Absolute hrefs that do not point at the engine
//! itself are taken as direct results.

use crate::client::HttpFetch;
use crate::models::SearchQuery;
use crate::validator;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

const ENGINE_BASE: &str = "https://html.duckduckgo.com";

/// Query parameters known to carry the redirect target.
const REDIRECT_PARAMS: &[&str] = &["uddg", "kh"];

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// The results-page URL for a topic.
pub(crate) fn search_url(topic: &str) -> String {
    format!("{ENGINE_BASE}/html/?q={}", urlencoding::encode(topic))
}

/// Collect up to `remaining` candidate URLs from the engine's results page.
/// Best-effort: any failure is logged and yields an empty list.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, remaining))]
pub async fn find<C: HttpFetch>(client: &C, query: &SearchQuery, remaining: usize) -> Vec<String> {
    if remaining == 0 {
        return Vec::new();
    }

    let url = search_url(&query.topic);
    let page = match client.get(&url).await {
        Ok(page) if page.is_success() => page,
        Ok(page) => {
            warn!(status = page.status, "Search engine returned non-success status");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Search engine fetch failed");
            return Vec::new();
        }
    };

    let document = Html::parse_document(&page.body);
    let mut urls = Vec::new();
    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(target) = resolve_result_href(href) else {
            continue;
        };
        if validator::is_candidate(&target) {
            debug!(url = %target, "Engine result candidate");
            urls.push(target);
        }
        if urls.len() >= remaining {
            break;
        }
    }

    info!(count = urls.len(), "Engine results strategy finished");
    urls
}

/// Decode a result href to its destination URL.
///
/// Indirection links (`/l/?uddg=...`, `/l/?kh=...`) yield their decoded
/// parameter; absolute links off the engine's own domain pass through
/// unchanged; everything else is discarded.
fn resolve_result_href(href: &str) -> Option<String> {
    if href.contains("/l/?") {
        let base = Url::parse(ENGINE_BASE).ok()?;
        let resolved = base.join(href).ok()?;
        return resolved
            .query_pairs()
            .find(|(key, _)| REDIRECT_PARAMS.contains(&key.as_ref()))
            .map(|(_, value)| value.into_owned());
    }
    if href.starts_with("http") && !href.contains("duckduckgo.com") {
        return Some(href.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockFetch;
    use crate::models::RecencyWindow;

    fn query() -> SearchQuery {
        SearchQuery::new("test topic", 5, RecencyWindow::Week).unwrap()
    }

    #[test]
    fn test_search_url_encodes_topic() {
        assert_eq!(
            search_url("ai agents 2026"),
            "https://html.duckduckgo.com/html/?q=ai%20agents%202026"
        );
    }

    #[test]
    fn test_resolve_decodes_redirect_param() {
        let href = "/l/?uddg=https%3A%2F%2Fexample.com%2Fnews%2Fstory&rut=abc";
        assert_eq!(
            resolve_result_href(href).as_deref(),
            Some("https://example.com/news/story")
        );

        let href = "//duckduckgo.com/l/?kh=https%3A%2F%2Fexample.com%2Fblog%2Fpost";
        assert_eq!(
            resolve_result_href(href).as_deref(),
            Some("https://example.com/blog/post")
        );
    }

    #[test]
    fn test_resolve_passes_direct_offsite_links() {
        assert_eq!(
            resolve_result_href("https://example.com/news/story").as_deref(),
            Some("https://example.com/news/story")
        );
        assert!(resolve_result_href("https://duckduckgo.com/about").is_none());
        assert!(resolve_result_href("/settings").is_none());
    }

    #[tokio::test]
    async fn test_find_extracts_and_filters_results() {
        let body = r#"<html><body>
            <a href="/l/?uddg=https%3A%2F%2Fexample.com%2Fnews%2Falpha">Alpha</a>
            <a href="https://other.org/2024/05/06/beta">Beta</a>
            <a href="https://facebook.com/news/excluded">Social</a>
            <a href="https://duckduckgo.com/settings">Settings</a>
            <a href="/html/?q=next">Next page</a>
        </body></html>"#;
        let mock = MockFetch::new().page(&search_url("test topic"), body);

        let urls = find(&mock, &query(), 5).await;
        assert_eq!(
            urls,
            vec![
                "https://example.com/news/alpha".to_string(),
                "https://other.org/2024/05/06/beta".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_find_stops_at_remaining() {
        let links: String = (0..6)
            .map(|i| format!(r#"<a href="https://example.com/news/story-{i}">r</a>"#))
            .collect();
        let mock = MockFetch::new().page(
            &search_url("test topic"),
            &format!("<html><body>{links}</body></html>"),
        );

        let urls = find(&mock, &query(), 2).await;
        assert_eq!(urls.len(), 2);
    }

    #[tokio::test]
    async fn test_find_swallows_fetch_failure() {
        let mock = MockFetch::new();
        assert!(find(&mock, &query(), 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_find_swallows_blocked_status() {
        let mock = MockFetch::new().status(&search_url("test topic"), 403, "blocked");
        assert!(find(&mock, &query(), 3).await.is_empty());
    }
}
