//! Article content extraction via ordered selector cascades.
//!
//! Given a parsed HTML page, [`extract`] pulls out a title, body text, and
//! publish date using cascades of selectors ordered from most specific to
//! most generic. Each cascade takes the first rule that yields an acceptable
//! value; when nothing qualifies the field degrades to a default
//! (`"Untitled Article"`, an extraction-failure marker, today's date) rather
//! than erroring.
//!
//! # Noise stripping
//!
//! Real pages bury article text under navigation chrome, consent banners,
//! sharing widgets, and ad slots. `scraper`'s DOM is immutable, so instead
//! of deleting those nodes we assemble text through a tree walk that skips
//! every noise element and its subtree. The same filter applies to every
//! cascade, so boilerplate never leaks into a heuristic.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Body value recorded when no extraction rule produced enough text.
pub const EXTRACTION_FAILED: &str = "Content extraction failed";

/// Title recorded when no selector produced a usable headline.
pub const UNTITLED: &str = "Untitled Article";

/// Minimum text length for a body container to be accepted.
const MIN_BODY_CHARS: usize = 300;

/// Minimum length for a paragraph to count in the fallback concatenation.
const MIN_PARAGRAPH_CHARS: usize = 20;

/// Titles are capped at this many characters.
const MAX_TITLE_CHARS: usize = 150;

/// Structural elements that never contain article text.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "iframe", "noscript", "form",
];

/// Class names marking nested non-article blocks inside a content container.
const NOISE_CLASSES: &[&str] = &[
    "sidebar",
    "related",
    "comments",
    "social",
    "share",
    "advertisement",
    "ad",
];

fn selectors(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .map(|p| Selector::parse(p).unwrap())
        .collect()
}

static TITLE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    selectors(&[
        "h1.entry-title",
        "h1.post-title",
        "h1.article-title",
        r#"h1[class*="title"]"#,
        "h1",
        r#"meta[property="og:title"]"#,
        r#"meta[name="twitter:title"]"#,
        "title",
        ".headline",
        ".page-title",
    ])
});

static BODY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    selectors(&[
        "article .entry-content",
        "article .post-content",
        "article .article-content",
        "article .content",
        "article",
        r#"[role="main"] .content"#,
        r#"[role="main"]"#,
        "main article",
        "main .content",
        "main",
        ".entry-content",
        ".post-content",
        ".article-content",
        ".article-body",
        ".story-content",
        ".story-body",
        "#content .content",
        "#content",
        ".main-content",
    ])
});

static DATE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    selectors(&[
        "time[datetime]",
        r#"meta[property="article:published_time"]"#,
        r#"meta[property="article:modified_time"]"#,
        r#"meta[name="twitter:data1"]"#,
        ".published",
        ".date",
        ".post-date",
        ".article-date",
        ".entry-date",
        ".timestamp",
    ])
});

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ISO_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Extracted page fields, each already defaulted if its cascade found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub title: String,
    pub body: String,
    pub published: String,
}

/// Run all three cascades over a parsed page. Never fails.
pub fn extract(document: &Html) -> Extraction {
    Extraction {
        title: extract_title(document),
        body: extract_body(document),
        published: extract_date(document),
    }
}

fn is_noise(el: ElementRef) -> bool {
    let name = el.value().name();
    if NOISE_TAGS.contains(&name) {
        return true;
    }
    el.value()
        .classes()
        .any(|class| NOISE_CLASSES.contains(&class))
}

fn in_noise_context(el: ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_noise)
}

/// Collect the text of `root` and its descendants, skipping noise subtrees.
/// Text chunks are trimmed and joined with newlines, mirroring a
/// separator-per-node extraction.
fn noise_free_text(root: ElementRef) -> String {
    let mut chunks = Vec::new();
    collect_text(root, &mut chunks);
    chunks.join("\n")
}

fn collect_text(el: ElementRef, chunks: &mut Vec<String>) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !is_noise(child_el) {
                collect_text(child_el, chunks);
            }
        }
    }
}

/// Title cascade: specific headline classes, then any `h1`, then page and
/// social-preview metadata. The winner is whitespace-normalized, cut at the
/// first pipe/hyphen separator (usually a trailing site name), and capped at
/// 150 characters.
fn extract_title(document: &Html) -> String {
    for selector in TITLE_SELECTORS.iter() {
        let Some(element) = document.select(selector).next() else {
            continue;
        };
        let raw = if element.value().name() == "meta" {
            element.value().attr("content").unwrap_or("").to_string()
        } else {
            element.text().collect::<Vec<_>>().join(" ")
        };
        let raw = raw.trim();
        if raw.chars().count() <= 5 {
            continue;
        }

        let title = WHITESPACE_RUNS.replace_all(raw, " ");
        let title = title
            .split('|')
            .next()
            .unwrap_or("")
            .split('-')
            .next()
            .unwrap_or("")
            .trim();
        if title.is_empty() {
            continue;
        }
        return title.chars().take(MAX_TITLE_CHARS).collect();
    }
    UNTITLED.to_string()
}

/// Body cascade: container selectors from most to least specific, accepting
/// the first whose noise-free text clears the minimum length; then a
/// paragraph-concatenation fallback; then the failure marker.
fn extract_body(document: &Html) -> String {
    for selector in BODY_SELECTORS.iter() {
        let Some(container) = document.select(selector).next() else {
            continue;
        };
        let text = noise_free_text(container);
        if text.chars().count() > MIN_BODY_CHARS {
            return text;
        }
    }

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .filter(|p| !in_noise_context(*p))
        .map(|p| p.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();
    let text = paragraphs.join("\n");
    if text.chars().count() > MIN_BODY_CHARS {
        return text;
    }

    EXTRACTION_FAILED.to_string()
}

/// Date cascade: machine-readable `<time>` elements, article metadata, then
/// generic date-classed nodes. ISO-8601 values normalize to `YYYY-MM-DD`;
/// date-shaped text keeps its first ten characters; anything else is capped
/// at fifty characters. Defaults to today.
fn extract_date(document: &Html) -> String {
    for selector in DATE_SELECTORS.iter() {
        let Some(element) = document.select(selector).next() else {
            continue;
        };
        let raw = match element.value().name() {
            "meta" => element.value().attr("content").unwrap_or("").to_string(),
            "time" => element
                .value()
                .attr("datetime")
                .map(str::to_string)
                .unwrap_or_else(|| element.text().collect::<Vec<_>>().join(" ")),
            _ => element.text().collect::<Vec<_>>().join(" "),
        };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        if raw.contains('T') {
            if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(raw) {
                return parsed.format("%Y-%m-%d").to_string();
            }
        }
        if ISO_DATE_PREFIX.is_match(raw) {
            return raw.chars().take(10).collect();
        }
        return raw.chars().take(50).collect();
    }

    Local::now().format("%Y-%m-%d").to_string()
}
