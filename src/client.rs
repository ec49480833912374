//! HTTP fetch and politeness-delay capabilities.
//!
//! All three discovery strategies and the fetch stage go through the
//! [`HttpFetch`] trait, so tests can swap in an in-memory page server and
//! the rest of the pipeline never knows. The production implementation is
//! [`HttpClient`], a thin wrapper over a per-search `reqwest::Client` with
//! a bounded timeout and a randomized browser identity chosen fresh for
//! every request — there is no process-wide mutable header state.
//!
//! [`Pause`] is the politeness primitive: the fetch stage sleeps a duration
//! sampled uniformly from the configured window between consecutive
//! requests. Tests inject [`NoPause`].

use crate::config::ScoutConfig;
use crate::error::BoxError;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

/// Used when the configured user-agent pool is empty.
const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// The outcome of one HTTP GET: final status, body, and the URL after
/// transport-level redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
    pub final_url: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP capability every strategy and the fetch stage depend on.
pub trait HttpFetch {
    async fn get(&self, url: &str) -> Result<FetchedPage, BoxError>;
}

/// Production client: bounded timeout, randomized per-request identity.
pub struct HttpClient {
    inner: reqwest::Client,
    user_agents: Vec<String>,
}

impl HttpClient {
    /// Build a client for a single search invocation. Each invocation gets
    /// its own connection pool and identity pool; nothing is shared.
    pub fn new(config: &ScoutConfig) -> Result<Self, BoxError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            inner,
            user_agents: config.user_agents.clone(),
        })
    }

    /// Browser-like headers with a user agent sampled from the pool.
    fn request_headers(&self) -> HeaderMap {
        let ua = pick_user_agent(&self.user_agents, &mut rand::rng());
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(ua) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
        headers.insert(
            HeaderName::from_static("upgrade-insecure-requests"),
            HeaderValue::from_static("1"),
        );
        headers
    }
}

impl HttpFetch for HttpClient {
    async fn get(&self, url: &str) -> Result<FetchedPage, BoxError> {
        let response = self.inner.get(url).headers(self.request_headers()).send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        debug!(url, status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage {
            status,
            body,
            final_url,
        })
    }
}

/// Pure selection of a user agent from a pool. The caller supplies the RNG,
/// so identity rotation carries no shared mutable state.
pub fn pick_user_agent<'a, R: Rng>(pool: &'a [String], rng: &mut R) -> &'a str {
    if pool.is_empty() {
        return FALLBACK_USER_AGENT;
    }
    &pool[rng.random_range(0..pool.len())]
}

/// Scheduling seam between consecutive fetches.
pub trait Pause {
    async fn pause(&self);
}

/// Sleep a duration sampled uniformly from `[min_ms, max_ms]`. Keeps the
/// outbound request rate bounded so scraped sites see a polite client.
pub struct JitterPause {
    min_ms: u64,
    max_ms: u64,
}

impl JitterPause {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        // Tolerate a config with swapped bounds.
        if min_ms <= max_ms {
            Self { min_ms, max_ms }
        } else {
            Self {
                min_ms: max_ms,
                max_ms: min_ms,
            }
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(config.delay_min_ms, config.delay_max_ms)
    }
}

impl Pause for JitterPause {
    async fn pause(&self) {
        let ms = rand::rng().random_range(self.min_ms..=self.max_ms);
        debug!(ms, "Pausing between fetches");
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Zero-delay implementation for tests.
pub struct NoPause;

impl Pause for NoPause {
    async fn pause(&self) {}
}
