use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::{ServerConfig, WebConfig};
use crate::zone::Domain;

pub const LOCAL_CONFIG_FILE: &str = "dnsm.toml";
pub const SYSTEM_CONFIG_FILE: &str = "/etc/dnsm/config.toml";

/// Main configuration document.
///
/// Sections this process does not model (auth, login, ...) are not part of
/// this struct; they are preserved on disk by the record document writer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Upstream resolvers, tried in order.
    #[serde(default = "default_upstream")]
    pub upstream: Vec<String>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Locally served domains and their records.
    #[serde(default)]
    pub domains: Vec<Domain>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            server: ServerConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
            domains: Vec::new(),
        }
    }
}

fn default_upstream() -> Vec<String> {
    vec!["223.5.5.5:53".to_string(), "223.6.6.6:53".to_string()]
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsm.toml in current directory
    /// 3. /etc/dnsm/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match Self::locate(path) {
            Some(found) => Self::from_file(&found)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// The file that `load` reads, if any.
    pub fn locate(path: Option<&str>) -> Option<String> {
        if let Some(path) = path {
            return Some(path.to_string());
        }
        [LOCAL_CONFIG_FILE, SYSTEM_CONFIG_FILE]
            .into_iter()
            .find(|candidate| Path::new(candidate).exists())
            .map(str::to_string)
    }

    /// The file record mutations are written to. Falls back to
    /// `dnsm.toml` in the working directory when nothing exists yet.
    pub fn document_path(path: Option<&str>) -> String {
        Self::locate(path).unwrap_or_else(|| LOCAL_CONFIG_FILE.to_string())
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.port = port;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.web_port {
            self.web.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        if let Some(blank) = self.upstream.iter().find(|u| u.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Invalid upstream server '{}'",
                blank
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub host: Option<String>,
    pub web_port: Option<u16>,
    pub log_level: Option<String>,
}
