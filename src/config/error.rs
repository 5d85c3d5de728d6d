//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolve::UnknownServiceError;
use crate::task::TaskSpecError;

/// Everything that can reject a configuration.
///
/// Any of these stops the process before a single task is polled.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--config` file could not be read.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// File that was requested
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `dnsup init` could not write the template.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Destination of the template
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A required value came from neither the command line nor the file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// See [`field`]
        field: &'static str,
        /// Where the value can be supplied
        hint: &'static str,
    },

    /// The provider endpoint is not a usable base URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Endpoint as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// A duration is malformed or zero.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// `poll_interval` or `query_timeout`
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Inconsistent retry settings.
    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    /// TTL of zero.
    #[error("Invalid TTL: must be greater than 0")]
    InvalidTtl,

    /// API key that cannot be sent as a header value.
    #[error("Invalid API key: {reason}")]
    InvalidApiKey {
        /// Header value error
        reason: String,
    },

    /// Unknown publish failure policy.
    #[error("Invalid publish failure policy '{value}': expected continue or abort")]
    InvalidPolicy {
        /// Policy as given
        value: String,
    },

    /// Unknown reflection service.
    #[error(transparent)]
    InvalidService(#[from] UnknownServiceError),

    /// Rejected interface specification.
    #[error(transparent)]
    Task(#[from] TaskSpecError),
}

/// Field names reported by [`ConfigError::MissingRequired`].
pub mod field {
    /// Domain whose records are updated.
    pub const DOMAIN: &str = "domain";
    /// Interface specifications.
    pub const INTERFACES: &str = "interfaces";
    /// Provider API key.
    pub const APIKEY: &str = "apikey";
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingRequired`].
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
