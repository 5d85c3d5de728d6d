//! Configuration for dnsup: command line, TOML file and defaults.
//!
//! [`Cli`] parses arguments (including `dnsup init`), [`TomlConfig`] reads
//! the optional file, and [`ValidatedConfig::from_raw`] merges both into
//! the single value the rest of the program uses. [`defaults`] holds the
//! built-in values and [`write_default_config`] emits a commented template.
//!
//! # Precedence
//!
//! Command line first, then the file, then [`defaults`]. `--apikey` and
//! `--ttl` fall back to `DNSUP_APIKEY` and `DNSUP_TTL` before the file is
//! consulted.
//!
//! The domain and at least one interface spec must come from one of the
//! two sources. The API key may only be omitted with `--dry-run`.
//! Interface specs on the command line replace `monitor.interfaces`
//! rather than extending it.
//!
//! `--bind-v6` can only switch binding on: `true` in either source wins.
//! `--dry-run` and `--verbose` exist only on the command line, and
//! `retry.max_delay` and `retry.multiplier` only in the file.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FailurePolicyArg, ServiceArg};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
