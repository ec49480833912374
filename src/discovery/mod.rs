//! Discovery strategies and the dispatcher that runs them.
//!
//! Three independent strategies produce candidate article URLs for a query.
//! Each follows the same contract: `find(client, query, remaining)` returns
//! a best-effort list of raw URL strings and never lets an internal failure
//! escape its boundary.
//!
//! # Strategies
//!
//! | Priority | Module | Method | Notes |
//! |----------|--------|--------|-------|
//! | 1 | [`engine`] | Search-engine result parsing | Decodes redirect links to their true targets |
//! | 2 | [`site_search`] | Per-site search URLs | Fixed list of known publications |
//! | 3 | [`listing`] | Category/listing pages | Structural selector cascade, recency filtered |
//!
//! The dispatcher runs them in that fixed order. After each strategy, the
//! validated and deduplicated running set is measured; later strategies run
//! only while it is still short of the limit, and each receives the shrunken
//! remaining target. If the primary search surface is blocked or its markup
//! changes, the pipeline degrades to the site-specific heuristics instead of
//! failing outright.

pub mod engine;
pub mod listing;
pub mod site_search;

use crate::client::HttpFetch;
use crate::models::{CandidateUrl, SearchQuery, StrategyKind};
use crate::validator;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Run all strategies in priority order and return the validated,
/// deduplicated candidate set, truncated to `query.limit`.
#[instrument(level = "info", skip_all, fields(topic = %query.topic, limit = query.limit))]
pub async fn discover<C: HttpFetch>(client: &C, query: &SearchQuery) -> Vec<CandidateUrl> {
    info!(
        recency = %query.recency,
        token = query.recency.search_token(),
        "Starting discovery"
    );

    let mut candidates: Vec<CandidateUrl> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let found = engine::find(client, query, query.limit).await;
    merge(&mut candidates, &mut seen, found, StrategyKind::EngineResults, query.limit);
    info!(count = candidates.len(), strategy = %StrategyKind::EngineResults, "Merged strategy results");

    if candidates.len() < query.limit {
        let remaining = query.limit - candidates.len();
        let found = site_search::find(client, query, remaining).await;
        merge(&mut candidates, &mut seen, found, StrategyKind::SiteSearch, query.limit);
        info!(count = candidates.len(), strategy = %StrategyKind::SiteSearch, "Merged strategy results");
    }

    if candidates.len() < query.limit {
        let remaining = query.limit - candidates.len();
        let found = listing::find(client, query, remaining).await;
        merge(&mut candidates, &mut seen, found, StrategyKind::Listing, query.limit);
        info!(count = candidates.len(), strategy = %StrategyKind::Listing, "Merged strategy results");
    }

    candidates.truncate(query.limit);
    info!(count = candidates.len(), "Discovery complete");
    candidates
}

/// Merge one strategy's raw URLs into the running candidate set: drop
/// duplicates (first occurrence wins), drop anything the validator rejects,
/// and stop once the set reaches `limit`. Idempotent over the same input.
fn merge(
    candidates: &mut Vec<CandidateUrl>,
    seen: &mut HashSet<String>,
    found: Vec<String>,
    strategy: StrategyKind,
    limit: usize,
) {
    for url in found {
        if candidates.len() >= limit {
            break;
        }
        if !seen.insert(url.clone()) {
            debug!(%url, "Duplicate candidate dropped");
            continue;
        }
        if !validator::is_candidate(&url) {
            debug!(%url, %strategy, "Candidate failed validation");
            continue;
        }
        candidates.push(CandidateUrl {
            url,
            strategy,
            valid: true,
        });
    }
}
