//! Per-site search strategy.
//!
//! For a short fixed list of publications with known on-site search paths,
//! construct a search URL with the topic encoded into it, then scan the
//! result markup for links that carry a current-or-prior-year path segment.
//! Relative links are joined against the site's base URL.

use crate::client::HttpFetch;
use crate::models::SearchQuery;
use crate::validator::{self, recent_year_segments};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A publication with an on-site search endpoint.
pub(crate) struct SearchSite {
    pub base: &'static str,
    /// Path prefix the encoded topic is appended to.
    pub prefix: &'static str,
    /// Suffix appended after the encoded topic.
    pub suffix: &'static str,
}

pub(crate) const SITES: &[SearchSite] = &[
    SearchSite {
        base: "https://techcrunch.com",
        prefix: "/search/",
        suffix: "/",
    },
    SearchSite {
        base: "https://www.theverge.com",
        prefix: "/search?q=",
        suffix: "",
    },
    SearchSite {
        base: "https://arstechnica.com",
        prefix: "/search/?query=",
        suffix: "",
    },
];

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// The search URL for a topic on one site.
pub(crate) fn search_url(site: &SearchSite, topic: &str) -> String {
    format!(
        "{}{}{}{}",
        site.base,
        site.prefix,
        urlencoding::encode(topic),
        site.suffix
    )
}

/// Collect up to `remaining` candidate URLs across the fixed site list.
/// A site that fails to fetch or parse is skipped; the rest still run.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, remaining))]
pub async fn find<C: HttpFetch>(client: &C, query: &SearchQuery, remaining: usize) -> Vec<String> {
    let mut urls = Vec::new();
    let year_segments = recent_year_segments();

    for site in SITES {
        if urls.len() >= remaining {
            break;
        }

        let url = search_url(site, &query.topic);
        let page = match client.get(&url).await {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                warn!(site = site.base, status = page.status, "Site search returned non-success status");
                continue;
            }
            Err(e) => {
                warn!(site = site.base, error = %e, "Site search fetch failed");
                continue;
            }
        };

        let Ok(base) = Url::parse(site.base) else {
            continue;
        };
        let document = Html::parse_document(&page.body);
        for element in document.select(&ANCHOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Ok(joined) = base.join(href) else {
                continue;
            };
            let joined = joined.to_string();
            if !year_segments.iter().any(|seg| joined.contains(seg)) {
                continue;
            }
            if validator::is_candidate(&joined) {
                debug!(url = %joined, "Site search candidate");
                urls.push(joined);
                if urls.len() >= remaining {
                    break;
                }
            }
        }
    }

    info!(count = urls.len(), "Site search strategy finished");
    urls
}
