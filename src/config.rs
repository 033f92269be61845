use std::env;
use std::time::Duration;

use crate::services::analysis::DEFAULT_MIN_SUMMARY_BARS;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// How long fetched bars stay cached.
    pub bar_cache_ttl: Duration,
    /// Timeout for provider requests.
    pub fetch_timeout: Duration,
    /// Scoring preset used when a request names none.
    pub scoring_profile: String,
    /// Bars needed before the summary view is shown.
    pub min_summary_bars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3002,
            bar_cache_ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(30),
            scoring_profile: "titan".to_string(),
            min_summary_bars: DEFAULT_MIN_SUMMARY_BARS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset or unparsable values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            bar_cache_ttl: lookup("BAR_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.bar_cache_ttl),
            fetch_timeout: lookup("FETCH_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            scoring_profile: lookup("SCORING_PROFILE")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.scoring_profile),
            min_summary_bars: lookup("MIN_SUMMARY_BARS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_summary_bars),
        }
    }
}
