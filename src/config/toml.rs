//! The `dnsup.toml` file format.
//!
//! Every key is optional; whatever is missing falls back to the command
//! line or a built-in default during validation.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Contents of a `dnsup.toml` file, before validation.
///
/// Unknown sections and keys are rejected so typos surface at startup.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// `[provider]`
    #[serde(default)]
    pub provider: ProviderSection,

    /// `[discovery]`
    #[serde(default)]
    pub discovery: DiscoverySection,

    /// `[monitor]`
    #[serde(default)]
    pub monitor: MonitorSection,

    /// `[retry]`
    #[serde(default)]
    pub retry: RetrySection,
}

/// `[provider]`: where and how records are written.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Domain whose records are updated
    pub domain: Option<String>,

    /// Provider API key
    pub apikey: Option<String>,

    /// Record TTL in seconds
    pub ttl: Option<u32>,

    /// Provider API base URL
    pub endpoint: Option<String>,
}

/// `[discovery]`: reflection settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySection {
    /// Reflection service name
    pub service: Option<String>,

    /// Reflection query timeout, e.g. "10s"
    pub query_timeout: Option<String>,

    /// Bind IPv6 reflection queries to each candidate
    #[serde(default)]
    pub bind_v6: bool,
}

/// `[monitor]`: what to poll and how failures are handled.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Default poll interval, e.g. "1m"
    pub poll_interval: Option<String>,

    /// "continue" or "abort"
    pub on_publish_failure: Option<String>,

    /// Interface specifications
    #[serde(default)]
    pub interfaces: Vec<String>,
}

/// `[retry]`: backoff for failed record updates.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Attempts per publish, counting the first
    pub max_attempts: Option<u32>,

    /// Seconds before the first retry
    pub initial_delay: Option<u64>,

    /// Upper bound for any pause, in seconds
    pub max_delay: Option<u64>,

    /// Factor between consecutive pauses
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FileRead`] when the file is unreadable, otherwise
    /// whatever [`Self::parse`] reports.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        std::fs::read_to_string(path)
            .map_err(|source| ConfigError::FileRead {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| Self::parse(&text))
    }

    /// Parses file contents.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TomlParse`] for malformed TOML, unknown keys or
    /// values of the wrong type.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Commented template written by `dnsup init`.
#[must_use]
pub fn default_config_template() -> String {
    r#"# dnsup configuration file

[provider]
# Domain whose records are updated (required, or pass it on the command line)
# domain = "example.com"

# Provider API key (required unless --dry-run; also read from DNSUP_APIKEY)
# apikey = "your-api-key"

# Record TTL in seconds (default: 300; also read from DNSUP_TTL)
# ttl = 300

# Provider API base URL
# endpoint = "https://dns.api.gandi.net/api/v5"

[discovery]
# Reflection service for resolve strategies: akamai, cloudflare, google, opendns
service = "google"

# Upper bound for one reflection query; never longer than the poll interval
# query_timeout = "10s"

# Bind IPv6 reflection queries to each candidate address
# bind_v6 = false

[monitor]
# Default poll interval for tasks that do not set one
poll_interval = "1m"

# What to do when publishing fails: continue or abort
# on_publish_failure = "continue"

# Interfaces to monitor: <interface>[:<label>[:<strategy>[:<interval>]]]
# Strategies: assign/assigned/inet/inet4, inet6, resolve/resolv/resolv4, resolv6
# Note: interfaces given on the command line REPLACE this list
# interfaces = ["eth0:home", "eth1:office:resolv4:5m"]

[retry]
# Attempts per record update, counting the first one
# max_attempts = 3

# Seconds to wait before the first retry
# initial_delay = 5

# Longest wait between two attempts, in seconds
# max_delay = 60

# Each wait is the previous one times this factor
# multiplier = 2.0
"#
    .to_string()
}
