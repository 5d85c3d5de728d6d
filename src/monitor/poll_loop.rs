//! Per-task polling loop.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use super::{ChangeTracker, MonitorError};
use crate::network::AddressEnumerator;
use crate::publish::{PublishOutcome, Publisher};
use crate::resolve::{AddressResolver, Reflector};
use crate::task::Task;

/// What to do when publishing a changed address fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishFailurePolicy {
    /// Log the failure and keep polling.
    #[default]
    Continue,
    /// Stop the loop and report the failure to the supervisor.
    Abort,
}

/// Settings shared by every poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Detect and log changes without publishing.
    pub dry_run: bool,
    /// Reaction to publish failures.
    pub on_publish_failure: PublishFailurePolicy,
    /// Upper bound for one reflection query.
    pub query_timeout: Duration,
}

impl LoopOptions {
    /// Default reflection query timeout.
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            on_publish_failure: PublishFailurePolicy::default(),
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// Result of a single non-fatal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The interface had no usable addresses.
    NothingToPublish,
    /// Resolution failed; the tick was skipped.
    Unresolved,
    /// The resolved address matched the remembered one.
    Unchanged(IpAddr),
    /// The changed address was published.
    Published {
        /// The new address
        address: IpAddr,
        /// What the publisher reported
        outcome: PublishOutcome,
    },
    /// The address changed but dry-run suppressed publishing.
    DryRun(IpAddr),
    /// Publishing failed and the policy is to continue.
    PublishFailed(IpAddr),
}

/// Polls one task: enumerate, resolve, diff, publish.
///
/// # Type Parameters
///
/// * `E` - The [`AddressEnumerator`] listing interface addresses
/// * `R` - The [`Reflector`] behind the shared [`AddressResolver`]
/// * `P` - The [`Publisher`] receiving changed addresses
pub struct PollLoop<E, R, P> {
    task: Task,
    enumerator: Arc<E>,
    resolver: Arc<AddressResolver<R>>,
    publisher: Arc<P>,
    options: LoopOptions,
    tracker: ChangeTracker,
}

impl<E, R, P> PollLoop<E, R, P>
where
    E: AddressEnumerator,
    R: Reflector,
    P: Publisher,
{
    /// Creates a loop for `task` with an empty change tracker.
    #[must_use]
    pub const fn new(
        task: Task,
        enumerator: Arc<E>,
        resolver: Arc<AddressResolver<R>>,
        publisher: Arc<P>,
        options: LoopOptions,
    ) -> Self {
        Self {
            task,
            enumerator,
            resolver,
            publisher,
            options,
            tracker: ChangeTracker::new(),
        }
    }

    /// Returns the task this loop polls.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the last address acted on.
    #[must_use]
    pub const fn last_address(&self) -> Option<IpAddr> {
        self.tracker.last()
    }

    /// Per-query timeout, never longer than the poll interval.
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        self.options.query_timeout.min(self.task.poll_interval())
    }

    /// Runs one poll cycle.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Enumerate`] if the interface cannot be read,
    /// and [`MonitorError::Publish`] if publishing fails under
    /// [`PublishFailurePolicy::Abort`].
    pub async fn tick(&mut self) -> Result<TickOutcome, MonitorError> {
        let interface = self.task.interface();
        let label = self.task.label();

        let candidates =
            self.enumerator
                .addresses(interface)
                .map_err(|source| MonitorError::Enumerate {
                    interface: interface.to_string(),
                    source,
                })?;

        let address = match self
            .resolver
            .resolve(self.task.strategy(), &candidates, self.query_timeout())
            .await
        {
            Ok(Some(address)) => address,
            Ok(None) => {
                tracing::debug!(interface, label, "No candidate addresses");
                return Ok(TickOutcome::NothingToPublish);
            }
            Err(e) => {
                tracing::warn!(interface, label, error = %e, "Address resolution failed");
                return Ok(TickOutcome::Unresolved);
            }
        };

        if !self.tracker.observe(address) {
            tracing::debug!(interface, label, address = %address, "Address unchanged");
            return Ok(TickOutcome::Unchanged(address));
        }

        if self.options.dry_run {
            tracing::info!(interface, label, address = %address, "Dry-run: address changed, not publishing");
            return Ok(TickOutcome::DryRun(address));
        }

        match self.publisher.publish(label, &address.to_string()).await {
            Ok(outcome) => {
                tracing::info!(interface, label, address = %address, "Published address");
                Ok(TickOutcome::Published { address, outcome })
            }
            Err(source) => match self.options.on_publish_failure {
                PublishFailurePolicy::Continue => {
                    tracing::error!(label, address = %address, error = %source, "Publish failed");
                    Ok(TickOutcome::PublishFailed(address))
                }
                PublishFailurePolicy::Abort => Err(MonitorError::Publish {
                    label: label.to_string(),
                    source,
                }),
            },
        }
    }

    /// Ticks every poll interval until `shutdown` turns true or a tick fails.
    ///
    /// The first tick fires one interval after start. A slow tick delays the
    /// following ones rather than bunching them up. Shutdown is checked
    /// between ticks; a tick in progress always completes.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from [`Self::tick`].
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), MonitorError> {
        let period = self.task.poll_interval();
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(task = %self.task, "Poll loop started");

        loop {
            tokio::select! {
                biased;

                () = stop_requested(&mut shutdown) => {
                    tracing::debug!(task = %self.task, "Poll loop stopped");
                    return Ok(());
                }

                _ = ticker.tick() => {
                    self.tick().await?;
                }
            }
        }
    }
}

/// Resolves once `shutdown` turns true or its sender is gone.
///
/// The `watch::Ref` guard never outlives this call; it is not `Send`.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|&stop| stop).await;
}
