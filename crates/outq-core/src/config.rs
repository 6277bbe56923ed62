use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Storage key prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "@outq";

/// Header that marks a send as a replay from the queue.
pub const MARKER_HEADER: &str = "x-from-storage";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub retries: u32,
    /// Multiplier applied per retry (1.0 = constant delay).
    pub factor: f64,
    /// Delay before the first retry, in milliseconds.
    pub min_timeout_ms: u64,
    /// Upper bound on any single delay, in milliseconds.
    pub max_timeout_ms: u64,
    /// Multiply each delay by a random factor in [1, 2).
    pub randomize: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            factor: 1.0,
            min_timeout_ms: 500,
            max_timeout_ms: 1000,
            randomize: false,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        RetryPolicy {
            retries: cfg.retries,
            factor: cfg.factor,
            min_timeout: Duration::from_millis(cfg.min_timeout_ms),
            max_timeout: Duration::from_millis(cfg.max_timeout_ms),
            randomize: cfg.randomize,
        }
    }
}

/// Timeouts for the default curl transport (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/outq/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutqConfig {
    /// Namespace prefix for queue keys in the store.
    pub prefix: String,
    /// Drain the queue before every fresh send.
    #[serde(default)]
    pub send_from_storage_first: bool,
    /// Cap on concurrent replays during a drain (None = all at once).
    #[serde(default)]
    pub drain_concurrency: Option<usize>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional transport timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

impl Default for OutqConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            send_from_storage_first: false,
            drain_concurrency: None,
            retry: None,
            transport: None,
        }
    }
}

impl OutqConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_default()
    }

    pub fn transport_config(&self) -> TransportConfig {
        self.transport.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("outq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OutqConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OutqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<OutqConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: OutqConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
