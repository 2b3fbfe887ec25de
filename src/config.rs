use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Allowed CORS origins. An empty list serves the open policy
    /// (any origin, GET/POST/OPTIONS, Content-Type).
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// IANA timezone used for peak-hour detection in the delay model
    /// (default: Australia/Sydney)
    #[serde(default = "Config::default_timezone")]
    pub timezone: String,
    /// Background feed refresh configuration
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Configuration for the scheduled transport feed refresh
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Interval in seconds between refresh cycles (default: 30)
    #[serde(default = "RefreshConfig::default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: Self::default_interval_secs(),
        }
    }
}

impl RefreshConfig {
    fn default_interval_secs() -> u64 {
        30
    }
}

impl Config {
    fn default_timezone() -> String {
        "Australia/Sydney".to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parsed timezone, falling back to Sydney when the configured name is
    /// not a valid IANA identifier.
    pub fn timezone(&self) -> chrono_tz::Tz {
        self.timezone
            .parse()
            .unwrap_or(chrono_tz::Australia::Sydney)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
