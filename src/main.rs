//! dnsup command-line entry point.
//!
//! Parses arguments, handles `init`, validates configuration and hands off
//! to [`run::execute`] on a multi-threaded Tokio runtime.

use dnsup::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match cli.command {
        Some(Command::Init { ref output }) => init(output),
        None => match ValidatedConfig::load(&cli) {
            Ok(config) => monitor(config),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                print_config_hint(&e);
                exit_code::CONFIG_ERROR
            }
        },
    }
}

/// Writes the configuration template for `dnsup init`.
fn init(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}

/// Polls every configured task until shutdown or a fatal error.
///
/// Not covered by tests; needs a live runtime and real interfaces.
#[cfg(not(tarpaulin_include))]
fn monitor(config: ValidatedConfig) -> ExitCode {
    setup_tracing(config.verbose);
    tracing::info!("{config}");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create Tokio runtime");
            return exit_code::runtime_error();
        }
    };

    if let Err(e) = runtime.block_on(run::execute(config)) {
        tracing::error!("Stopped: {e}");
        return exit_code::runtime_error();
    }

    exit_code::SUCCESS
}
