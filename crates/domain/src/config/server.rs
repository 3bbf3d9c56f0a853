use serde::{Deserialize, Serialize};

use crate::dns_record::DEFAULT_RECORD_TTL;

/// DNS listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// TTL applied to records created without one.
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_ttl: default_ttl(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, with an empty host meaning every interface.
    pub fn bind_address(&self) -> String {
        let host = if self.host.trim().is_empty() {
            "0.0.0.0"
        } else {
            self.host.trim()
        };
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    53
}

fn default_ttl() -> u32 {
    DEFAULT_RECORD_TTL
}

/// Management HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,

    #[serde(default = "default_web_port")]
    pub port: u16,

    /// Key expected in `X-Api-Key` on mutating management requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            api_key: None,
        }
    }
}

impl WebConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}
