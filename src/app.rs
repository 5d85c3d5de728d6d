//! Process-level helpers for the binary: exit codes, logging and hints.

use dnsup::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Process exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Clean shutdown or successful `init`.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Rejected configuration (exit code 1): bad flags, bad interface spec,
    /// missing domain or API key. Nothing has been polled yet.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Fatal error while monitoring (exit code 2), e.g. a missing interface
    /// or an aborted publish.
    ///
    /// A function because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints a follow-up hint for configuration errors users commonly hit.
pub fn print_config_hint(error: &ConfigError) {
    let hint = match error {
        ConfigError::MissingRequired { .. } | ConfigError::FileRead { .. } => {
            "Run 'dnsup init' to generate a configuration template."
        }
        ConfigError::Task(_) => {
            "Interface specs look like <interface>[:<label>[:<strategy>[:<interval>]]], \
             e.g. eth0:home:resolv4:5m"
        }
        _ => return,
    };

    eprintln!("\n{hint}");
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` overrides the default level, which is DEBUG with `--verbose`
/// and INFO otherwise.
pub fn setup_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();
}
