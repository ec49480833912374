//! Runtime configuration loaded from an optional YAML file.
//!
//! Every field has a sensible default, so the binary runs with no config
//! file at all. A file supplied with `-c/--config` may override any subset
//! of fields:
//!
//! ```yaml
//! request_timeout_secs: 15
//! delay_min_ms: 1000
//! delay_max_ms: 3000
//! user_agents:
//!   - "Mozilla/5.0 (X11; Linux x86_64) ..."
//! ```

use crate::error::BoxError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default bounds of the randomized delay between consecutive fetches.
const DEFAULT_DELAY_MIN_MS: u64 = 1000;
const DEFAULT_DELAY_MAX_MS: u64 = 3000;

/// Pool of browser user-agent strings sampled per request.
fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/121.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_delay_min_ms() -> u64 {
    DEFAULT_DELAY_MIN_MS
}

fn default_delay_max_ms() -> u64 {
    DEFAULT_DELAY_MAX_MS
}

/// Tunable knobs for the scraping pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Hard timeout applied to every outbound HTTP request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Lower bound of the randomized inter-fetch delay.
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,
    /// Upper bound of the randomized inter-fetch delay.
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,
    /// User-agent strings to sample from, one per request.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            delay_min_ms: DEFAULT_DELAY_MIN_MS,
            delay_max_ms: DEFAULT_DELAY_MAX_MS,
            user_agents: default_user_agents(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a YAML file.
    pub async fn load(path: &str) -> Result<Self, BoxError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config: ScoutConfig = serde_yaml::from_str(&raw)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }
}
