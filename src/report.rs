//! Rendering of the final research report.
//!
//! The rendered text is the one wire format this pipeline owns: a
//! deterministic, markdown-like document with a summary block, one block per
//! scraped article, and a closing insights block. Downstream consumers parse
//! it by convention, so the structure is stable — and the zero-result case
//! renders a distinct document carrying [`NO_RESULTS_MARKER`] that callers
//! can match on.

use crate::models::SearchReport;
use std::fmt::Write;

/// Sentinel substring identifying the empty report.
pub const NO_RESULTS_MARKER: &str = "No articles found for query:";

/// Render a report to markdown. Empty reports get the explicit no-results
/// document instead of an empty shell.
pub fn render_markdown(report: &SearchReport) -> String {
    if report.documents.is_empty() {
        return render_no_results(report);
    }

    let mut out = String::new();
    writeln!(out, "# Web Research Results: {}\n", report.topic).unwrap();

    writeln!(out, "## Search Summary\n").unwrap();
    writeln!(out, "- **Query:** {}", report.topic).unwrap();
    writeln!(out, "- **Recency Window:** {}", report.recency).unwrap();
    writeln!(out, "- **Articles Found:** {}", report.documents.len()).unwrap();
    writeln!(out, "- **Generated:** {}", report.generated_at).unwrap();
    writeln!(out, "- **Total Content:** {} words\n", report.total_words).unwrap();

    writeln!(out, "## Articles\n").unwrap();
    for (i, doc) in report.documents.iter().enumerate() {
        writeln!(out, "### Article {}: {}\n", i + 1, doc.title).unwrap();
        writeln!(out, "- **URL:** {}", doc.url).unwrap();
        writeln!(out, "- **Published:** {}", doc.published).unwrap();
        writeln!(out, "- **Word Count:** {} words\n", doc.word_count).unwrap();
        writeln!(out, "{}\n", doc.body).unwrap();
        writeln!(out, "**Source:** [{}]({})\n", doc.title, doc.url).unwrap();
        writeln!(out, "---\n").unwrap();
    }

    writeln!(out, "## Research Insights\n").unwrap();
    writeln!(
        out,
        "Gathered {} recent articles about \"{}\" totaling {} words of source material. \
         All sources passed URL validation and carried substantial extracted content.",
        report.documents.len(),
        report.topic,
        report.total_words
    )
    .unwrap();
    writeln!(out, "\n---").unwrap();
    writeln!(out, "*Report generated on {}*", report.generated_at).unwrap();

    out
}

fn render_no_results(report: &SearchReport) -> String {
    format!(
        "{NO_RESULTS_MARKER} {}. Try a different search term or a wider recency window.\n",
        report.topic
    )
}
