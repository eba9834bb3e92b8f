//! Runtime configuration resolved from the environment.
//!
//! Every setting has a default except the provider API key. A missing key is
//! not a startup failure: it is reported when the first fetch is attempted.

use crate::error::{LiveStatsError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const API_KEY_ENV_VAR: &str = "RAPIDAPI_KEY";
pub const API_HOST_ENV_VAR: &str = "CRICBUZZ_API_HOST";
pub const BASE_URL_ENV_VAR: &str = "CRICBUZZ_BASE_URL";
pub const DB_PATH_ENV_VAR: &str = "LIVESTATS_DB_PATH";
pub const ADDR_ENV_VAR: &str = "LIVESTATS_ADDR";
pub const REFRESH_ENV_VAR: &str = "LIVESTATS_REFRESH_SECS";
pub const TIMEOUT_ENV_VAR: &str = "LIVESTATS_TIMEOUT_SECS";

pub const DEFAULT_API_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";
pub const DEFAULT_BASE_URL: &str = "https://cricbuzz-cricket.p.rapidapi.com";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_REFRESH_SECS: u64 = 30;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings shared by the CLI commands and the web server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_path = match non_empty(DB_PATH_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_database_path(),
        };

        let addr = non_empty(ADDR_ENV_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|_| LiveStatsError::Config {
            message: format!("{} is not a socket address: {}", ADDR_ENV_VAR, addr),
        })?;

        Ok(Self {
            api_key: non_empty(API_KEY_ENV_VAR),
            api_host: non_empty(API_HOST_ENV_VAR).unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            base_url: non_empty(BASE_URL_ENV_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            database_path,
            bind_addr,
            refresh_interval_secs: parse_secs(REFRESH_ENV_VAR, non_empty(REFRESH_ENV_VAR), DEFAULT_REFRESH_SECS)?,
            request_timeout_secs: parse_secs(TIMEOUT_ENV_VAR, non_empty(TIMEOUT_ENV_VAR), DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// The provider key, or `MissingApiKey` when none was configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| LiveStatsError::MissingApiKey {
                env_var: API_KEY_ENV_VAR.to_string(),
            })
    }
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(LiveStatsError::Config {
                message: format!("{} must be a positive number of seconds, got {}", key, value),
            }),
        },
    }
}

/// Path: ~/.cache/cricbuzz-livestats/cricket.db
pub fn default_database_path() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("cricbuzz-livestats").join("cricket.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api_key, None);
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.refresh_interval_secs, DEFAULT_REFRESH_SECS);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.bind_addr.port(), 8501);
        assert!(config.database_path.ends_with("cricbuzz-livestats/cricket.db"));
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV_VAR, "secret"),
            (BASE_URL_ENV_VAR, "http://127.0.0.1:9999/"),
            (DB_PATH_ENV_VAR, "/tmp/cricket.db"),
            (ADDR_ENV_VAR, "0.0.0.0:8080"),
            (REFRESH_ENV_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.database_path, PathBuf::from("/tmp/cricket.db"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.refresh_interval_secs, 5);
    }

    #[test]
    fn test_missing_api_key_is_reported_on_demand() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_ENV_VAR, "  ")])).unwrap();

        match config.require_api_key() {
            Err(LiveStatsError::MissingApiKey { env_var }) => assert_eq!(env_var, API_KEY_ENV_VAR),
            other => panic!("Expected MissingApiKey, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_refresh_interval() {
        let result = AppConfig::from_lookup(lookup_from(&[(REFRESH_ENV_VAR, "0")]));
        assert!(matches!(result, Err(LiveStatsError::Config { .. })));

        let result = AppConfig::from_lookup(lookup_from(&[(REFRESH_ENV_VAR, "soon")]));
        assert!(matches!(result, Err(LiveStatsError::Config { .. })));
    }

    #[test]
    fn test_invalid_bind_address() {
        let result = AppConfig::from_lookup(lookup_from(&[(ADDR_ENV_VAR, "localhost")]));
        assert!(matches!(result, Err(LiveStatsError::Config { .. })));
    }
}
