//! Process configuration from environment variables.

use std::net::SocketAddr;

use crate::bart::BartConfig;
use crate::intent::WitConfig;
use crate::nextbus::NextBusConfig;
use crate::transport::HttpConfig;

/// Default listen address for the web server.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bart: BartConfig,
    pub nextbus: NextBusConfig,
    pub wit: WitConfig,
    pub http: HttpConfig,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `BART_API_KEY` | yes | |
    /// | `WIT_AI_ACCESS_TOKEN` | yes | |
    /// | `NEXTBUS_AGENCY` | no | `actransit` |
    /// | `BART_BASE_URL`, `NEXTBUS_BASE_URL`, `WIT_BASE_URL` | no | production |
    /// | `HTTP_TIMEOUT_SECS` | no | 30 |
    /// | `LISTEN_ADDR` | no | `127.0.0.1:3000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let mut bart = BartConfig::new(required("BART_API_KEY")?);
        if let Some(url) = var("BART_BASE_URL") {
            bart = bart.with_base_url(url);
        }

        let mut nextbus = var("NEXTBUS_AGENCY")
            .map(NextBusConfig::new)
            .unwrap_or_default();
        if let Some(url) = var("NEXTBUS_BASE_URL") {
            nextbus = nextbus.with_base_url(url);
        }

        let mut wit = WitConfig::new(required("WIT_AI_ACCESS_TOKEN")?);
        if let Some(url) = var("WIT_BASE_URL") {
            wit = wit.with_base_url(url);
        }

        let mut http = HttpConfig::default();
        if let Some(secs) = var("HTTP_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                message: e.to_string(),
            })?;
            http = http.with_timeout(secs);
        }

        let listen_addr = var("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "LISTEN_ADDR",
                message: e.to_string(),
            })?;

        Ok(Self {
            bart,
            nextbus,
            wit,
            http,
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [("BART_API_KEY", "bart-key"), ("WIT_AI_ACCESS_TOKEN", "wit-token")];

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.bart.api_key, "bart-key");
        assert_eq!(config.wit.access_token, "wit-token");
        assert_eq!(config.nextbus.agency, "actransit");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("NEXTBUS_AGENCY", "sf-muni"),
            ("BART_BASE_URL", "http://localhost:9000/api"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("LISTEN_ADDR", "0.0.0.0:8080"),
        ]);

        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.nextbus.agency, "sf-muni");
        assert_eq!(config.bart.base_url, "http://localhost:9000/api");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn missing_credentials() {
        let err = AppConfig::from_lookup(lookup(&[("WIT_AI_ACCESS_TOKEN", "t")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BART_API_KEY"));

        let err = AppConfig::from_lookup(lookup(&[("BART_API_KEY", "k"), ("WIT_AI_ACCESS_TOKEN", " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("WIT_AI_ACCESS_TOKEN"));
    }

    #[test]
    fn invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("LISTEN_ADDR", "not-an-address"));

        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "LISTEN_ADDR", .. }));
    }
}
