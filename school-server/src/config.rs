//! Process configuration from environment variables.

use std::time::Duration;

use crate::cache::CacheConfig;
use crate::directory::DirectoryConfig;
use crate::neis::NeisConfig;

/// Errors reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?} is not a valid number")]
    Invalid { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub port: u16,

    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,

    pub neis_base_url: Option<String>,
    pub cache_ttl: Option<Duration>,
    pub refresh_interval: Option<Duration>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var("NEIS_API_KEY").ok_or(ConfigError::Missing("NEIS_API_KEY"))?;

        let port = match var("PORT") {
            Some(value) => parse("PORT", value)?,
            None => 8080,
        };

        let log_level = match var("LOG_LEVEL").map(|level| level.to_lowercase()) {
            Some(level) if matches!(level.as_str(), "debug" | "info" | "warn" | "error") => level,
            _ => "info".to_string(),
        };

        let log_format = match var("LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let seconds = |name: &'static str| -> Result<Option<Duration>, ConfigError> {
            var(name)
                .map(|value| parse::<u64>(name, value).map(Duration::from_secs))
                .transpose()
        };

        Ok(Self {
            api_key,
            port,
            log_level,
            log_format,
            neis_base_url: var("NEIS_BASE_URL"),
            cache_ttl: seconds("CACHE_TTL_SECS")?,
            refresh_interval: seconds("REFRESH_INTERVAL_SECS")?,
        })
    }

    pub fn neis(&self) -> NeisConfig {
        let config = NeisConfig::new(&self.api_key);
        match &self.neis_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    pub fn cache(&self) -> CacheConfig {
        let config = CacheConfig::default();
        match self.cache_ttl {
            Some(ttl) => config.with_ttl(ttl),
            None => config,
        }
    }

    pub fn directory(&self) -> DirectoryConfig {
        let config = DirectoryConfig::default();
        match self.refresh_interval {
            Some(interval) => config.with_refresh_interval(interval),
            None => config,
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
