//! Application execution logic.
//!
//! Wires the validated configuration into the enumerator, resolver and
//! publisher, then supervises one poll loop per task until shutdown.

use thiserror::Error;
use tokio::signal;

use dnsup::config::ValidatedConfig;
use dnsup::monitor::{MonitorError, Supervisor};
use dnsup::network::platform::PlatformEnumerator;
use dnsup::publish::{GandiPublisher, HttpClient, HttpError, ReqwestClient};
use dnsup::resolve::{AddressResolver, DnsReflector};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// A poll loop stopped with a fatal error.
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the publisher, resolver and platform enumerator
/// 2. Starts one poll loop per configured task
/// 3. Runs until a shutdown signal (Ctrl+C, SIGTERM) or the first fatal error
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or any poll loop
/// fails fatally.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ReqwestClient::new().map_err(RunError::HttpClient)?;
    let publisher = create_publisher(&config, client);
    let resolver = create_resolver(&config);

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - changes will be logged but not published");
    }
    tracing::info!(
        domain = %config.domain,
        tasks = config.tasks.len(),
        service = %config.service,
        "Starting"
    );

    let supervisor = Supervisor::new(
        PlatformEnumerator::new(),
        resolver,
        publisher,
        config.loop_options,
    );

    supervisor.run(config.tasks, shutdown_signal()).await?;
    Ok(())
}

/// Creates the Gandi publisher from configuration.
fn create_publisher<H: HttpClient>(config: &ValidatedConfig, client: H) -> GandiPublisher<H> {
    let publisher = GandiPublisher::new(client, config.endpoint.clone(), config.domain.clone())
        .with_ttl(config.ttl)
        .with_retry_policy(config.retry_policy.clone());

    match config.api_key {
        Some(ref key) => publisher.with_api_key(key.clone()),
        None => publisher,
    }
}

/// Creates the address resolver from configuration.
fn create_resolver(config: &ValidatedConfig) -> AddressResolver<DnsReflector> {
    AddressResolver::new(
        DnsReflector::new(config.loop_options.query_timeout),
        config.service,
        config.bind_v6,
    )
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is logged and ignored.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
