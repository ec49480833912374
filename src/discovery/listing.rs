//! Direct listing-page strategy.
//!
//! The last resort: fetch a fixed list of category and tag pages that
//! reliably surface fresh coverage, and pull article links out of their
//! structure with an ordered cascade of selectors (article containers,
//! heading-level links, common post-title class patterns). Only links that
//! look recent survive.

use crate::client::HttpFetch;
use crate::models::SearchQuery;
use crate::validator;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Category and tag pages checked in order.
pub(crate) const LISTING_PAGES: &[&str] = &[
    "https://techcrunch.com/category/artificial-intelligence/",
    "https://www.theverge.com/ai-artificial-intelligence",
    "https://arstechnica.com/tag/artificial-intelligence/",
    "https://venturebeat.com/ai/",
    "https://www.wired.com/tag/artificial-intelligence/",
];

/// Structural patterns for article links, most specific first.
static LINK_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article a[href]",
        ".post-title a[href]",
        ".entry-title a[href]",
        "h1 a[href]",
        "h2 a[href]",
        "h3 a[href]",
        r#"[data-module="ArticleTeaser"] a[href]"#,
    ]
    .iter()
    .map(|p| Selector::parse(p).unwrap())
    .collect()
});

/// Collect up to `remaining` recent article URLs from the fixed listing
/// pages. The topic itself plays no role here; listings are the fallback
/// when query-driven strategies under-fill the quota.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, remaining))]
pub async fn find<C: HttpFetch>(client: &C, query: &SearchQuery, remaining: usize) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    'pages: for page_url in LISTING_PAGES {
        if urls.len() >= remaining {
            break;
        }

        let page = match client.get(page_url).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!(page = page_url, status = page.status, "Listing page returned non-success status");
                continue;
            }
            Err(e) => {
                warn!(page = page_url, error = %e, "Listing page fetch failed");
                continue;
            }
        };

        let Ok(base) = Url::parse(page_url) else {
            continue;
        };
        let document = Html::parse_document(&page.body);
        for selector in LINK_SELECTORS.iter() {
            for element in document.select(selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };
                let Ok(joined) = base.join(href) else {
                    continue;
                };
                let joined = joined.to_string();
                if validator::is_recent_candidate(&joined) {
                    debug!(url = %joined, "Listing candidate");
                    urls.push(joined);
                    if urls.len() >= remaining {
                        break 'pages;
                    }
                }
            }
        }
    }

    // The same link often matches several structural patterns.
    let urls: Vec<String> = urls.into_iter().unique().collect();
    info!(count = urls.len(), "Listing strategy finished");
    urls
}
