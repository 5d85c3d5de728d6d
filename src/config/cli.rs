//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::monitor::PublishFailurePolicy;
use crate::resolve::ReflectionService;

/// dnsup: keep DNS records pointed at your interfaces
///
/// Polls network interfaces, derives the address to publish either locally
/// or through DNS reflection, and updates a Gandi LiveDNS record whenever
/// it changes.
#[derive(Debug, Parser)]
#[command(name = "dnsup")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Domain whose records are updated
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Interfaces to monitor: <interface>[:<label>[:<strategy>[:<interval>]]]
    #[arg(value_name = "INTERFACE_SPEC")]
    pub interfaces: Vec<String>,

    /// Provider API key
    #[arg(long, env = "DNSUP_APIKEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// TTL of published records in seconds
    #[arg(long, env = "DNSUP_TTL")]
    pub ttl: Option<u32>,

    /// DNS reflection service used by resolve strategies
    #[arg(long, value_enum, ignore_case = true)]
    pub service: Option<ServiceArg>,

    /// Default poll interval for tasks without one (e.g. 90s, 1m30s)
    #[arg(long = "poll-interval", value_name = "DURATION")]
    pub poll_interval: Option<String>,

    /// Upper bound for one reflection query (e.g. 10s)
    #[arg(long = "query-timeout", value_name = "DURATION")]
    pub query_timeout: Option<String>,

    /// Bind IPv6 reflection queries to each candidate address
    #[arg(long = "bind-v6")]
    pub bind_v6: bool,

    /// What to do when a publish fails
    #[arg(long = "on-publish-failure", value_enum, ignore_case = true)]
    pub on_publish_failure: Option<FailurePolicyArg>,

    /// Provider API base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Maximum number of publish attempts
    #[arg(long = "retry-max")]
    pub retry_max: Option<u32>,

    /// Initial retry delay in seconds
    #[arg(long = "retry-delay")]
    pub retry_delay: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Test mode - log changes without publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for dnsup
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "dnsup.toml")]
        output: PathBuf,
    },
}

/// Reflection service argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    /// Akamai whoami (TXT)
    Akamai,
    /// Cloudflare whoami (TXT)
    Cloudflare,
    /// Google o-o.myaddr (TXT)
    Google,
    /// `OpenDNS` myip (A/AAAA)
    #[value(name = "opendns")]
    OpenDns,
}

impl From<ServiceArg> for ReflectionService {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Akamai => Self::Akamai,
            ServiceArg::Cloudflare => Self::Cloudflare,
            ServiceArg::Google => Self::Google,
            ServiceArg::OpenDns => Self::OpenDns,
        }
    }
}

/// Publish failure policy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicyArg {
    /// Log the failure and keep polling
    Continue,
    /// Stop with an error
    Abort,
}

impl From<FailurePolicyArg> for PublishFailurePolicy {
    fn from(arg: FailurePolicyArg) -> Self {
        match arg {
            FailurePolicyArg::Continue => Self::Continue,
            FailurePolicyArg::Abort => Self::Abort,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
