//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::routes::KMB_ROUTE_LIST_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the bus route server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Route list endpoint
    pub route_url: String,
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
    /// Serve this JSON fixture instead of calling the API
    pub mock_data: Option<PathBuf>,
    /// Static asset directory
    pub static_dir: PathBuf,
    /// Re-issue the route request on this interval (off if `None`)
    pub refresh_interval: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            route_url: KMB_ROUTE_LIST_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mock_data: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            refresh_interval: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    ///
    /// | Variable           | Default                                    |
    /// |--------------------|--------------------------------------------|
    /// | `KMB_ROUTE_URL`    | the public KMB route list endpoint         |
    /// | `BIND_ADDR`        | `127.0.0.1:3000`                           |
    /// | `KMB_TIMEOUT_SECS` | `30`                                       |
    /// | `KMB_MOCK_DATA`    | unset (live API)                           |
    /// | `STATIC_DIR`       | `static`                                   |
    /// | `KMB_REFRESH_SECS` | unset (no periodic refresh)                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: value.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };

        let timeout_secs = match get("KMB_TIMEOUT_SECS") {
            Some(value) => parse_secs("KMB_TIMEOUT_SECS", &value)?,
            None => defaults.timeout_secs,
        };

        let refresh_interval = get("KMB_REFRESH_SECS")
            .map(|value| parse_secs("KMB_REFRESH_SECS", &value))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            route_url: get("KMB_ROUTE_URL").unwrap_or(defaults.route_url),
            bind_addr,
            timeout_secs,
            mock_data: get("KMB_MOCK_DATA").map(PathBuf::from),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            refresh_interval,
        })
    }

    /// Set the route list URL.
    pub fn with_route_url(mut self, url: impl Into<String>) -> Self {
        self.route_url = url.into();
        self
    }

    /// Serve a fixture file instead of calling the API.
    pub fn with_mock_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.mock_data = Some(path.into());
        self
    }

    /// Set the periodic refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }
}

/// Parse a positive number of seconds.
fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.route_url, KMB_ROUTE_LIST_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.mock_data.is_none());
        assert!(config.refresh_interval.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("KMB_ROUTE_URL", "http://localhost:9000/route/"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("KMB_TIMEOUT_SECS", "5"),
            ("KMB_MOCK_DATA", "data/mock_routes.json"),
            ("STATIC_DIR", "/srv/static"),
            ("KMB_REFRESH_SECS", "600"),
        ]))
        .unwrap();

        assert_eq!(config.route_url, "http://localhost:9000/route/");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.mock_data, Some(PathBuf::from("data/mock_routes.json")));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(600)));
    }

    #[test]
    fn empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("KMB_MOCK_DATA", ""), ("BIND_ADDR", " ")]))
            .unwrap();
        assert!(config.mock_data.is_none());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));

        let err = AppConfig::from_lookup(lookup(&[("KMB_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("KMB_TIMEOUT_SECS"));

        let err = AppConfig::from_lookup(lookup(&[("KMB_REFRESH_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn builder_methods() {
        let config = AppConfig::default()
            .with_route_url("http://mock")
            .with_mock_data("fixture.json")
            .with_refresh_interval(Duration::from_secs(60));

        assert_eq!(config.route_url, "http://mock");
        assert_eq!(config.mock_data, Some(PathBuf::from("fixture.json")));
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(60)));
    }
}
