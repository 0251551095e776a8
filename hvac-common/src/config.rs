// hvac-common/src/config.rs
use std::env;
use std::time::Duration;

use tracing::debug;

use super::error::{HvacError, Result};

pub const DEFAULT_URL: &str = "http://192.168.1.44/nodeconfig.html?node=1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_EXCERPT_CHARS: usize = 70;
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

const URL_VAR: &str = "HVAC_URL";
const TIMEOUT_VAR: &str = "HVAC_TIMEOUT";
const POLL_INTERVAL_VAR: &str = "HVAC_POLL_INTERVAL";
const EXCERPT_CHARS_VAR: &str = "HVAC_EXCERPT_CHARS";
const PREVIEW_CHARS_VAR: &str = "HVAC_PREVIEW_CHARS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Status page of the device being polled.
    pub url: String,
    /// Upper bound on one whole request, connect through last body byte.
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub excerpt_chars: usize,
    /// How much of the body to keep for diagnostics when the fields are missing.
    pub preview_chars: usize,
    /// `None` polls forever.
    pub max_cycles: Option<u64>,
}

impl Config {
    /// Loads configuration from `HVAC_*` environment variables on top of the defaults.
    pub fn load() -> Result<Self> {
        debug!("Loading hvac configuration");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        debug!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    /// Same as [`Config::load`] but reads variables through `lookup`, so callers
    /// can supply values without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let url = get(URL_VAR).unwrap_or_else(|| {
            debug!(
                "{} not set or empty, falling back to default: {}",
                URL_VAR, DEFAULT_URL
            );
            DEFAULT_URL.to_string()
        });

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => parse_duration(TIMEOUT_VAR, &raw)?,
            None => DEFAULT_TIMEOUT,
        };
        let poll_interval = match get(POLL_INTERVAL_VAR) {
            Some(raw) => parse_duration(POLL_INTERVAL_VAR, &raw)?,
            None => DEFAULT_POLL_INTERVAL,
        };
        let excerpt_chars = match get(EXCERPT_CHARS_VAR) {
            Some(raw) => parse_count(EXCERPT_CHARS_VAR, &raw)?,
            None => DEFAULT_EXCERPT_CHARS,
        };
        let preview_chars = match get(PREVIEW_CHARS_VAR) {
            Some(raw) => parse_count(PREVIEW_CHARS_VAR, &raw)?,
            None => DEFAULT_PREVIEW_CHARS,
        };

        let config = Self {
            url,
            timeout,
            poll_interval,
            excerpt_chars,
            preview_chars,
            max_cycles: None,
        };
        config.check()?;
        Ok(config)
    }

    /// Rejects values that would make a poll cycle meaningless.
    pub fn check(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(HvacError::Config("device URL is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(HvacError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.excerpt_chars == 0 {
            return Err(HvacError::Config(
                "excerpt length must be at least one character".to_string(),
            ));
        }
        if self.max_cycles == Some(0) {
            return Err(HvacError::Config(
                "cycle count must be at least one".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            max_cycles: None,
        }
    }
}

/// Parses a humantime duration such as `5s`, `250ms` or `1m 30s`.
pub fn parse_duration(name: &str, raw: &str) -> Result<Duration> {
    humantime::parse_duration(raw.trim())
        .map_err(|e| HvacError::Config(format!("Invalid duration '{raw}' for {name}: {e}")))
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| HvacError::Config(format!("Invalid number '{raw}' for {name}: {e}")))
}
