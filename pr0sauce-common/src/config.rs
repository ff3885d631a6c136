//! Configuration loading and resolution
//!
//! Bootstrap settings are resolved in priority order:
//! 1. Command-line argument
//! 2. Environment variable (1 and 2 arrive together as [`ConfigOverrides`])
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Compiled default values
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const BIND: &'static str = "127.0.0.1:3000";
    pub const GRAPHQL_ENDPOINT: &'static str = "http://127.0.0.1:8080/v1/graphql";
    pub const OEMBED_ENDPOINT: &'static str = "https://open.spotify.com/oembed";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const LOG_LEVEL: &'static str = "info";
}

/// Contents of `config.toml`
///
/// Every key is optional; anything left out falls through to the compiled
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Listen address for the HTTP server
    #[serde(default)]
    pub bind: Option<String>,

    /// GraphQL endpoint serving the `item` query
    #[serde(default)]
    pub graphql_endpoint: Option<String>,

    /// oEmbed endpoint used for cover art lookups
    #[serde(default)]
    pub oembed_endpoint: Option<String>,

    /// Timeout applied to every outbound HTTP request
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::LOG_LEVEL.to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub graphql_endpoint: Option<String>,
    pub oembed_endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Fully resolved and validated configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub graphql_endpoint: Url,
    pub oembed_endpoint: Url,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl AppConfig {
    /// Merge overrides, TOML values and compiled defaults, then validate
    pub fn resolve(overrides: &ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let bind = pick(
            overrides.bind.as_deref(),
            toml_config.bind.as_deref(),
            CompiledDefaults::BIND,
        );
        let bind: SocketAddr = bind
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {:?}: {}", bind, e)))?;

        let graphql_endpoint = parse_endpoint(
            "graphql_endpoint",
            pick(
                overrides.graphql_endpoint.as_deref(),
                toml_config.graphql_endpoint.as_deref(),
                CompiledDefaults::GRAPHQL_ENDPOINT,
            ),
        )?;

        let oembed_endpoint = parse_endpoint(
            "oembed_endpoint",
            pick(
                overrides.oembed_endpoint.as_deref(),
                toml_config.oembed_endpoint.as_deref(),
                CompiledDefaults::OEMBED_ENDPOINT,
            ),
        )?;

        let timeout_secs = overrides
            .request_timeout_secs
            .or(toml_config.request_timeout_secs)
            .unwrap_or(CompiledDefaults::REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            bind,
            graphql_endpoint,
            oembed_endpoint,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: toml_config.logging.level.clone(),
        })
    }
}

fn pick<'a>(cli_or_env: Option<&'a str>, toml: Option<&'a str>, default: &'a str) -> &'a str {
    cli_or_env.or(toml).unwrap_or(default)
}

/// Parse an endpoint, accepting only absolute http(s) URLs
fn parse_endpoint(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid {} {:?}: {}", key, raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "Invalid {} {:?}: unsupported scheme {:?}",
            key, raw, scheme
        ))),
    }
}

/// Platform config file location (`<config_dir>/pr0sauce/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pr0sauce").join("config.toml"))
}

/// TOML config together with the file it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub toml: TomlConfig,
    /// `None` when no file was read and the defaults apply
    pub source: Option<PathBuf>,
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. The platform default file is
/// optional: when it is absent the defaults are used. Nothing is logged here
/// since this runs before the subscriber is installed; callers report
/// [`LoadedConfig::source`] once logging is up.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(LoadedConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let toml: TomlConfig = toml::from_str(&content)?;
    Ok(LoadedConfig {
        toml,
        source: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = AppConfig::resolve(&ConfigOverrides::default(), &TomlConfig::default()).unwrap();

        assert_eq!(config.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.graphql_endpoint.as_str(), "http://127.0.0.1:8080/v1/graphql");
        assert_eq!(config.oembed_endpoint.as_str(), "https://open.spotify.com/oembed");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_override_beats_toml() {
        let overrides = ConfigOverrides {
            bind: Some("0.0.0.0:8000".to_string()),
            request_timeout_secs: Some(3),
            ..Default::default()
        };
        let toml_config = TomlConfig {
            bind: Some("127.0.0.1:9000".to_string()),
            graphql_endpoint: Some("https://api.example.com/graphql".to_string()),
            request_timeout_secs: Some(30),
            ..Default::default()
        };

        let config = AppConfig::resolve(&overrides, &toml_config).unwrap();
        assert_eq!(config.bind.port(), 8000);
        assert_eq!(config.graphql_endpoint.as_str(), "https://api.example.com/graphql");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let overrides = ConfigOverrides {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        let err = AppConfig::resolve(&overrides, &TomlConfig::default()).unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let overrides = ConfigOverrides {
            graphql_endpoint: Some("ftp://example.com/graphql".to_string()),
            ..Default::default()
        };
        let err = AppConfig::resolve(&overrides, &TomlConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        let overrides = ConfigOverrides {
            bind: Some("not-an-address".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&overrides, &TomlConfig::default()).is_err());
    }
}
