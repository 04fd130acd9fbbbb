use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Named aggregation configurations, keyed by the public path segment
    /// (`/{config}/...`)
    #[serde(default)]
    pub configs: HashMap<String, ConfigSource>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Shared outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// One named aggregation configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigSource {
    /// Upstream base URLs in priority order. Entries may carry a trailing
    /// `/manifest.json`; they are canonicalized at startup.
    #[serde(default)]
    pub upstreams: Vec<String>,
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:7700".parse().unwrap()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("AddonHub/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:7700");
        assert_eq!(config.upstream.connect_timeout_secs, 10);
        assert_eq!(config.upstream.request_timeout_secs, 30);
        assert!(config.upstream.user_agent.starts_with("AddonHub/"));
        assert!(config.configs.is_empty());
    }

    #[test]
    fn test_parse_configs_table() {
        let config: Config = toml::from_str(
            r#"
[configs.demo]
upstreams = ["http://a.example/manifest.json", "http://b.example"]

[configs.kids]
upstreams = ["http://kids.example"]
"#,
        )
        .unwrap();
        assert_eq!(config.configs.len(), 2);
        assert_eq!(config.configs["demo"].upstreams.len(), 2);
        assert_eq!(
            config.configs["kids"].upstreams,
            vec!["http://kids.example"]
        );
    }
}
