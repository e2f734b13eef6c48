use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// One addressable server replica, reachable at `protocol://host:port`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// URL scheme, `http` or `https`.
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl NodeConfig {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
        }
    }

    /// Base URL for this node (no path).
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Client configuration (optionally loadable from TOML).
///
/// Read-only once the client is constructed; validated once, before the
/// first request is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Candidate server replicas, tried in round-robin order.
    pub nodes: Vec<NodeConfig>,
    /// Optional preferred replica, tried before the regular pool while viable.
    #[serde(default)]
    pub nearest_node: Option<NodeConfig>,
    /// API credential sent with every request.
    pub api_key: String,
    /// Connect/response timeout applied to each single attempt.
    #[serde(default = "default_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,
    /// How long an unhealthy node stays out of rotation before it is
    /// considered stale and eligible again.
    #[serde(default = "default_healthcheck_interval_seconds")]
    pub healthcheck_interval_seconds: u64,
    /// Retries after the first attempt (total attempts = num_retries + 1).
    #[serde(default = "default_num_retries")]
    pub num_retries: u32,
    /// Fixed pause between attempts, in seconds (e.g. 0.1 = 100ms).
    #[serde(default = "default_retry_interval_seconds")]
    pub retry_interval_seconds: f64,
}

fn default_connection_timeout_seconds() -> u64 {
    10
}

fn default_healthcheck_interval_seconds() -> u64 {
    60
}

fn default_num_retries() -> u32 {
    3
}

fn default_retry_interval_seconds() -> f64 {
    1.0
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            nearest_node: None,
            api_key: String::new(),
            connection_timeout_seconds: default_connection_timeout_seconds(),
            healthcheck_interval_seconds: default_healthcheck_interval_seconds(),
            num_retries: default_num_retries(),
            retry_interval_seconds: default_retry_interval_seconds(),
        }
    }
}

impl Configuration {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::MissingConfiguration(e.to_string()))
    }

    /// Fail-closed validation, run once at client construction: the node
    /// list must be non-empty, every node must form a parseable URL, and
    /// the API key must be set.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::MissingConfiguration(
                "at least one node must be configured".to_string(),
            ));
        }
        for node in self.nodes.iter().chain(self.nearest_node.iter()) {
            validate_node(node)?;
        }
        if self.api_key.is_empty() {
            return Err(Error::MissingConfiguration(
                "api_key must be set".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_node(node: &NodeConfig) -> Result<()> {
    if node.protocol.is_empty() || node.host.is_empty() || node.port == 0 {
        return Err(Error::MissingConfiguration(
            "each node needs protocol, host and port".to_string(),
        ));
    }
    Url::parse(&node.base_url())
        .map_err(|e| Error::MissingConfiguration(format!("invalid node {}: {}", node.base_url(), e)))?;
    Ok(())
}
