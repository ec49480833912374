//! Pure URL predicates used during discovery filtering and as the final
//! gate before fetching.
//!
//! No network access, fully deterministic for a given clock date. Two
//! variants exist: [`is_candidate`] accepts anything article-shaped, while
//! [`is_recent_candidate`] additionally demands a current-or-prior-year
//! path segment.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Hosts that never serve scrapeable articles: social networks plus generic
/// search and shopping portals. Matched as substrings of the domain.
const EXCLUDED_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "pinterest.com",
    "reddit.com",
    "google.com",
    "bing.com",
    "yahoo.com",
    "duckduckgo.com",
    "amazon.com",
    "ebay.com",
];

/// Path fragments that suggest a URL points at an article rather than a
/// landing page or index.
const ARTICLE_INDICATORS: &[&str] = &[
    "/news/",
    "/article/",
    "/story/",
    "/post/",
    "/blog/",
    "/artificial-intelligence/",
    "/ai/",
    "/tech/",
    "/technology/",
];

/// A plausible 4-digit year segment anywhere in the URL path.
static YEAR_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(?:19|20)\d{2}/").unwrap());

/// Path segments for the current and immediately prior year, e.g.
/// `["/2026/", "/2025/"]`.
pub fn recent_year_segments() -> [String; 2] {
    let year = Local::now().year();
    [format!("/{year}/"), format!("/{}/", year - 1)]
}

/// Is this string a usable, non-excluded, article-like URL?
///
/// Requires an http/https scheme with a non-empty host, a host that matches
/// none of the excluded domains, and at least one article-like indicator:
/// a known path fragment or a 4-digit year segment.
pub fn is_candidate(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();
    if EXCLUDED_DOMAINS.iter().any(|d| host.contains(d)) {
        return false;
    }

    let lower = url.to_lowercase();
    ARTICLE_INDICATORS.iter().any(|i| lower.contains(i)) || YEAR_SEGMENT.is_match(&lower)
}

/// Like [`is_candidate`], but the URL must also carry a current-or-prior-year
/// segment. Used where discovery wants recent articles specifically.
pub fn is_recent_candidate(url: &str) -> bool {
    if !is_candidate(url) {
        return false;
    }
    recent_year_segments().iter().any(|seg| url.contains(seg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Local};

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(!is_candidate("ftp://example.com/news/story"));
        assert!(!is_candidate("mailto:someone@example.com"));
        assert!(!is_candidate("not a url"));
    }

    #[test]
    fn test_rejects_excluded_hosts_with_any_suffix() {
        for base in [
            "https://www.facebook.com",
            "https://twitter.com",
            "https://google.com",
            "https://news.google.com",
            "https://duckduckgo.com",
            "https://www.amazon.com",
        ] {
            for suffix in ["/news/story", "/article/2025/ai", "/tech/?q=anything#frag"] {
                let url = format!("{base}{suffix}");
                assert!(!is_candidate(&url), "should reject {url}");
            }
        }
    }

    #[test]
    fn test_accepts_article_indicators() {
        assert!(is_candidate("https://example.com/news/big-event"));
        assert!(is_candidate("https://example.com/blog/entry"));
        assert!(is_candidate("https://example.com/artificial-intelligence/models"));
        assert!(is_candidate("https://example.com/technology/chips"));
    }

    #[test]
    fn test_accepts_year_segment() {
        assert!(is_candidate("https://example.com/2024/05/06/slug"));
        assert!(is_candidate("https://example.com/1999/retrospective/"));
    }

    #[test]
    fn test_rejects_unmarked_paths() {
        assert!(!is_candidate("https://example.com/"));
        assert!(!is_candidate("https://example.com/about"));
        assert!(!is_candidate("https://example.com/pricing?plan=pro"));
    }

    #[test]
    fn test_recent_requires_current_or_prior_year() {
        let year = Local::now().year();
        assert!(is_recent_candidate(&format!(
            "https://example.com/{year}/01/02/slug"
        )));
        assert!(is_recent_candidate(&format!(
            "https://example.com/{}/12/31/slug",
            year - 1
        )));
        assert!(!is_recent_candidate(&format!(
            "https://example.com/{}/12/31/slug",
            year - 2
        )));
        // Article-like but undated is not "recent".
        assert!(!is_recent_candidate("https://example.com/news/evergreen"));
    }

    #[test]
    fn test_recent_year_segments_shape() {
        let [current, prior] = recent_year_segments();
        assert!(current.starts_with('/') && current.ends_with('/'));
        assert_eq!(current.len(), 6);
        assert_ne!(current, prior);
    }
}
