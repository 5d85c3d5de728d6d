//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::monitor::{LoopOptions, PublishFailurePolicy};
use crate::publish::RetryPolicy;
use crate::resolve::ReflectionService;
use crate::task::{Task, parse_duration};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Domain whose records are updated
    pub domain: String,

    /// Parsed monitoring tasks, never empty
    pub tasks: Vec<Task>,

    /// Provider API key, marked sensitive; `None` only in dry-run mode
    pub api_key: Option<HeaderValue>,

    /// Record TTL in seconds
    pub ttl: u32,

    /// Provider API base URL
    pub endpoint: Url,

    /// Reflection service for resolve strategies
    pub service: ReflectionService,

    /// Options shared by every poll loop
    pub loop_options: LoopOptions,

    /// Bind IPv6 reflection queries to each candidate
    pub bind_v6: bool,

    /// Retry policy for failed publishes
    pub retry_policy: RetryPolicy,

    /// Dry-run mode (log changes without publishing)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ domain: {}, tasks: {}, endpoint: {}, ttl: {}, service: {}, \
             query_timeout: {:?}, bind_v6: {}, on_publish_failure: {:?}, retry: {}x/{}s, \
             apikey: {}, dry_run: {} }}",
            self.domain,
            self.tasks.len(),
            self.endpoint,
            self.ttl,
            self.service,
            self.loop_options.query_timeout,
            self.bind_v6,
            self.loop_options.on_publish_failure,
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
            if self.api_key.is_some() { "set" } else { "none" },
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment fallbacks) take precedence over
    /// TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing (`domain`, interfaces, `apikey` outside dry-run)
    /// - An interface specification is invalid
    /// - The endpoint URL is invalid
    /// - Duration values are malformed or zero
    /// - The service or failure policy name is unknown
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let domain = Self::resolve_domain(cli, toml)?;

        let poll_interval = Self::resolve_duration(
            "poll_interval",
            cli.poll_interval.as_deref(),
            toml.and_then(|t| t.monitor.poll_interval.as_deref()),
            defaults::poll_interval(),
        )?;

        let tasks = Self::resolve_tasks(cli, toml, poll_interval)?;

        let api_key = Self::resolve_api_key(cli, toml)?;
        if api_key.is_none() && !cli.dry_run {
            return Err(ConfigError::missing(
                field::APIKEY,
                "Use --apikey, DNSUP_APIKEY or set provider.apikey in config file",
            ));
        }

        let ttl = cli
            .ttl
            .or_else(|| toml.and_then(|t| t.provider.ttl))
            .unwrap_or(defaults::TTL);
        if ttl == 0 {
            return Err(ConfigError::InvalidTtl);
        }

        let endpoint = Self::resolve_endpoint(cli, toml)?;
        let service = Self::resolve_service(cli, toml)?;

        let query_timeout = Self::resolve_duration(
            "query_timeout",
            cli.query_timeout.as_deref(),
            toml.and_then(|t| t.discovery.query_timeout.as_deref()),
            defaults::query_timeout(),
        )?;

        let loop_options = LoopOptions {
            dry_run: cli.dry_run,
            on_publish_failure: Self::resolve_failure_policy(cli, toml)?,
            query_timeout,
        };

        // Flags only enable: true in either source wins.
        let bind_v6 = cli.bind_v6 || toml.is_some_and(|t| t.discovery.bind_v6);

        let retry_policy = Self::build_retry_policy(cli, toml)?;

        Ok(Self {
            domain,
            tasks,
            api_key,
            ttl,
            endpoint,
            service,
            loop_options,
            bind_v6,
            retry_policy,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_domain(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let domain = cli
            .domain
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.domain.as_deref()))
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                ConfigError::missing(
                    field::DOMAIN,
                    "Pass it as the first argument or set provider.domain in config file",
                )
            })?;

        Ok(domain.to_string())
    }

    fn resolve_tasks(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        default_interval: Duration,
    ) -> Result<Vec<Task>, ConfigError> {
        // CLI specs replace TOML specs entirely.
        let specs: &[String] = if cli.interfaces.is_empty() {
            toml.map_or(&[][..], |t| t.monitor.interfaces.as_slice())
        } else {
            &cli.interfaces
        };

        if specs.is_empty() {
            return Err(ConfigError::missing(
                field::INTERFACES,
                "Pass interface specs after the domain or set monitor.interfaces in config file",
            ));
        }

        Ok(Task::parse_all(specs, default_interval)?)
    }

    fn resolve_api_key(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<HeaderValue>, ConfigError> {
        let key = cli
            .apikey
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.apikey.as_deref()))
            .filter(|k| !k.is_empty());

        key.map(|k| {
            let mut value = HeaderValue::from_str(k).map_err(|e| ConfigError::InvalidApiKey {
                reason: e.to_string(),
            })?;
            value.set_sensitive(true);
            Ok(value)
        })
        .transpose()
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let endpoint = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: endpoint.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_service(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ReflectionService, ConfigError> {
        if let Some(service) = cli.service {
            return Ok(service.into());
        }

        match toml.and_then(|t| t.discovery.service.as_deref()) {
            Some(name) => Ok(name.parse()?),
            None => Ok(defaults::SERVICE),
        }
    }

    fn resolve_failure_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<PublishFailurePolicy, ConfigError> {
        if let Some(policy) = cli.on_publish_failure {
            return Ok(policy.into());
        }

        toml.and_then(|t| t.monitor.on_publish_failure.as_deref())
            .map_or(Ok(PublishFailurePolicy::default()), parse_failure_policy)
    }

    fn resolve_duration(
        field: &'static str,
        cli: Option<&str>,
        toml: Option<&str>,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let Some(value) = cli.or(toml) else {
            return Ok(default);
        };

        let duration = parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
            field,
            reason: e.to_string(),
        })?;

        if duration.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field,
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(duration)
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_secs(initial_delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_failure_policy(s: &str) -> Result<PublishFailurePolicy, ConfigError> {
    match s.to_lowercase().as_str() {
        "continue" => Ok(PublishFailurePolicy::Continue),
        "abort" => Ok(PublishFailurePolicy::Abort),
        _ => Err(ConfigError::InvalidPolicy {
            value: s.to_string(),
        }),
    }
}
