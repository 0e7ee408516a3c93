use std::env;
use std::time::Duration;

use trivia_core::model::Endpoint;

use crate::error::ConfigError;

/// Environment variable overriding the question endpoint.
pub const API_URL_ENV: &str = "TRIVIA_API_URL";
/// Environment variable overriding the HTTP timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "TRIVIA_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSourceConfig {
    pub endpoint: Endpoint,
    pub timeout: Duration,
}

impl Default for QuestionSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl QuestionSourceConfig {
    /// Read overrides from `TRIVIA_API_URL` and `TRIVIA_HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var(API_URL_ENV) {
            if !raw.trim().is_empty() {
                config = config.with_endpoint(&raw)?;
            }
        }
        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            if !raw.trim().is_empty() {
                config = config.with_timeout_secs(&raw)?;
            }
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Endpoint` if `raw` is not an http(s) URL.
    pub fn with_endpoint(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.endpoint = Endpoint::parse(raw)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` unless `raw` is a positive integer.
    pub fn with_timeout_secs(mut self, raw: &str) -> Result<Self, ConfigError> {
        let secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidTimeout {
                raw: raw.to_string(),
            })?;
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_open_trivia_db() {
        let config = QuestionSourceConfig::default();
        assert!(config.endpoint.as_str().starts_with("https://opentdb.com/api.php"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_validated() {
        let config = QuestionSourceConfig::default()
            .with_endpoint("http://localhost:8080/api.php")
            .unwrap()
            .with_timeout_secs("3")
            .unwrap();
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/api.php");
        assert_eq!(config.timeout, Duration::from_secs(3));

        assert!(QuestionSourceConfig::default().with_timeout_secs("0").is_err());
        assert!(QuestionSourceConfig::default().with_endpoint("nope").is_err());
    }
}
