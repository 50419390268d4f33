use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default refresh interval in milliseconds (5 minutes)
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5 * 60 * 1000;

/// Timeout for HTTP fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Refresh interval must be greater than zero")]
    InvalidInterval,
}

/// Dashboard configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsConfig {
    pub refresh: RefreshConfig,
    pub source: SourceConfig,
}

/// Refresh-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshConfig {
    /// Refresh interval in milliseconds
    pub interval_ms: u64,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

/// Where snapshot records come from
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP endpoint serving snapshot records
    pub url: Option<String>,
    /// Local JSON file with snapshot records
    pub file: Option<PathBuf>,
}

impl StatsConfig {
    /// Parse a JSON configuration document
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> Result<StatsConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    StatsConfig::from_json(&content)
}

/// Returns the path to the data directory for release-stats.
/// Uses $XDG_DATA_HOME/release-stats if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/release-stats,
/// or ./release-stats if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("release-stats.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("release-stats")
}
