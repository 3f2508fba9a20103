//! Connection settings for the remote campaign service.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Base URL used when `DMSCREEN_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout used when `DMSCREEN_TIMEOUT_SECS` is unset. Party
/// responses are generated remotely and can take a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// History length used when `DMSCREEN_HISTORY_LIMIT` is unset.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL does not parse or cannot carry paths.
    #[error("{var} must be an http(s) URL, got {value:?}: {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// A numeric setting is not a positive integer.
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Where and how to reach the remote campaign service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Number of history messages requested at bootstrap.
    pub history_limit: u32,
}

impl ServiceConfig {
    /// Reads `DMSCREEN_API_URL`, `DMSCREEN_TIMEOUT_SECS` and
    /// `DMSCREEN_HISTORY_LIMIT` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = parse_url(
            "DMSCREEN_API_URL",
            lookup("DMSCREEN_API_URL").as_deref().unwrap_or(DEFAULT_API_URL),
        )?;
        let timeout_secs = match lookup("DMSCREEN_TIMEOUT_SECS") {
            Some(value) => parse_positive::<u64>("DMSCREEN_TIMEOUT_SECS", &value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let history_limit = match lookup("DMSCREEN_HISTORY_LIMIT") {
            Some(value) => parse_positive::<u32>("DMSCREEN_HISTORY_LIMIT", &value)?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            history_limit,
        })
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        var,
        value: value.to_owned(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(url)
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("DMSCREEN_API_URL", "https://dm.example.com/api"),
            ("DMSCREEN_TIMEOUT_SECS", "30"),
            ("DMSCREEN_HISTORY_LIMIT", "200"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://dm.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.history_limit, 200);
    }

    #[test]
    fn test_rejects_bad_url() {
        for value in ["not a url", "ftp://files.example.com", "mailto:dm@example.com"] {
            let result = ServiceConfig::from_lookup(lookup(&[("DMSCREEN_API_URL", value)]));

            assert!(
                matches!(result, Err(ConfigError::InvalidUrl { .. })),
                "{value}"
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_numbers() {
        for (var, value) in [
            ("DMSCREEN_TIMEOUT_SECS", "0"),
            ("DMSCREEN_TIMEOUT_SECS", "-5"),
            ("DMSCREEN_HISTORY_LIMIT", "lots"),
        ] {
            match ServiceConfig::from_lookup(lookup(&[(var, value)])) {
                Err(ConfigError::InvalidNumber { var: reported, .. }) => assert_eq!(reported, var),
                other => panic!("expected InvalidNumber for {var}={value}, got {other:?}"),
            }
        }
    }
}
