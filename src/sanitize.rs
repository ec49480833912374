//! Cleaning and bounding of extracted article text.
//!
//! [`clean`] collapses whitespace, strips common boilerplate prompts, and
//! enforces a hard upper bound on per-document payload size with a
//! sentence-aware cut so the text never ends mid-word.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hard upper bound on cleaned body length, in characters.
pub const MAX_CONTENT_CHARS: usize = 3000;

/// How far back from the truncation point to look for a sentence terminator.
const SENTENCE_SEEK_CHARS: usize = 500;

static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Boilerplate phrases that leak out of consent banners, subscription
/// prompts, and sharing widgets. Matched case-insensitively; `.` does not
/// cross line boundaries, so a pattern only eats within its own line.
static BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Cookie Policy.*?Accept",
        r"(?i)Subscribe.*?newsletter",
        r"(?i)Follow us.*?social",
        r"(?i)Share this",
        r"(?i)Advertisement",
        r"(?i)Related:",
        r"(?i)Also read:",
        r"(?i)Sign up",
        r"(?i)Read more:",
        r"(?i)Continue reading",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Clean raw extracted text: collapse repeated newlines and whitespace to
/// single separators, strip boilerplate phrases, and bound the result at
/// [`MAX_CONTENT_CHARS`] characters with a sentence-aware cut.
pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = NEWLINE_RUNS.replace_all(raw, "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let mut text = text.into_owned();

    for pattern in BOILERPLATE.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    truncate_at_sentence(text.trim())
}

/// Bound `text` at [`MAX_CONTENT_CHARS`] characters. If a sentence
/// terminator (`.`, `!`, `?`) falls within the last [`SENTENCE_SEEK_CHARS`]
/// characters of the cut point, end there (inclusive); otherwise hard-cut
/// and append an ellipsis marker.
fn truncate_at_sentence(text: &str) -> String {
    if text.chars().count() <= MAX_CONTENT_CHARS {
        return text.to_string();
    }

    let truncated: String = text.chars().take(MAX_CONTENT_CHARS).collect();
    match truncated.rfind(['.', '!', '?']) {
        Some(idx) if truncated[..=idx].chars().count() > MAX_CONTENT_CHARS - SENTENCE_SEEK_CHARS => {
            truncated[..=idx].to_string()
        }
        _ => format!("{truncated}..."),
    }
}
