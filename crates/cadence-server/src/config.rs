use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Environment variable overriding [`ServerConfig::bind_addr`].
pub const ENV_BIND_ADDR: &str = "CADENCE_BIND_ADDR";
/// Environment variable overriding [`ServerConfig::log_filter`].
pub const ENV_LOG: &str = "CADENCE_LOG";

/// Server settings.
///
/// Layered as: built-in defaults, then an optional TOML file, then
/// environment variables, then command-line flags (applied by the CLI).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    /// Allow any origin, method and header (development only).
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_filter: "info".into(),
            request_timeout_secs: 30,
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> ServerResult<Self> {
        toml::from_str(source).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply `CADENCE_*` overrides from the process environment.
    pub fn with_env(self) -> ServerResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ServerResult<Self> {
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_BIND_ADDR}={addr:?}: {e}")))?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.log_filter, "info");
        assert_eq!(c.request_timeout(), Duration::from_secs(30));
        assert!(!c.cors_permissive);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str("bind_addr = \"0.0.0.0:8080\"\n").unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = ServerConfig {
            cors_permissive: true,
            request_timeout_secs: 5,
            ..Default::default()
        };
        let rendered = c.to_toml_string().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&rendered).unwrap(), c);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"cadence=debug\"").unwrap();
        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.log_filter, "cadence=debug");
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ServerConfig::load(dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let c = ServerConfig::default()
            .with_overrides(|key| match key {
                ENV_BIND_ADDR => Some("10.0.0.1:9000".into()),
                ENV_LOG => Some("debug".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(c.bind_addr, "10.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.log_filter, "debug");
    }

    #[test]
    fn bad_override_is_rejected() {
        let err = ServerConfig::default()
            .with_overrides(|key| (key == ENV_BIND_ADDR).then(|| "nowhere".to_string()))
            .unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
