//! Concurrent execution of every poll loop.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use super::{LoopOptions, MonitorError, PollLoop};
use crate::network::AddressEnumerator;
use crate::publish::Publisher;
use crate::resolve::{AddressResolver, Reflector};
use crate::task::Task;

/// Runs one [`PollLoop`] per task and fails fast.
///
/// Every loop shares the same enumerator, resolver and publisher. The first
/// fatal error from any loop stops all of them and becomes the result of
/// [`Supervisor::run`].
pub struct Supervisor<E, R, P> {
    enumerator: Arc<E>,
    resolver: Arc<AddressResolver<R>>,
    publisher: Arc<P>,
    options: LoopOptions,
}

impl<E, R, P> Supervisor<E, R, P>
where
    E: AddressEnumerator + 'static,
    R: Reflector + 'static,
    P: Publisher + 'static,
{
    /// Creates a supervisor around shared components.
    #[must_use]
    pub fn new(enumerator: E, resolver: AddressResolver<R>, publisher: P, options: LoopOptions) -> Self {
        Self {
            enumerator: Arc::new(enumerator),
            resolver: Arc::new(resolver),
            publisher: Arc::new(publisher),
            options,
        }
    }

    /// Polls `tasks` until `shutdown` completes or a loop fails.
    ///
    /// Returns `Ok(())` after a clean shutdown. Every loop has stopped by
    /// the time this returns.
    ///
    /// # Errors
    ///
    /// Returns the first [`MonitorError`] reported by any loop, or
    /// [`MonitorError::TaskPanicked`] if a loop panicked.
    pub async fn run<F>(&self, tasks: Vec<Task>, shutdown: F) -> Result<(), MonitorError>
    where
        F: Future<Output = ()>,
    {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (failure_tx, mut failures) = mpsc::channel::<MonitorError>(tasks.len().max(1));
        let mut loops = JoinSet::new();

        for task in tasks {
            tracing::info!(
                interface = task.interface(),
                label = task.label(),
                strategy = %task.strategy(),
                interval = ?task.poll_interval(),
                "Monitoring"
            );

            let poll_loop = PollLoop::new(
                task,
                Arc::clone(&self.enumerator),
                Arc::clone(&self.resolver),
                Arc::clone(&self.publisher),
                self.options,
            );
            let cancel = cancel_rx.clone();
            let failure_tx = failure_tx.clone();

            loops.spawn(async move {
                if let Err(e) = poll_loop.run(cancel).await {
                    // The receiver only closes once a failure has already been taken.
                    let _ = failure_tx.send(e).await;
                }
            });
        }
        drop(failure_tx);

        tokio::pin!(shutdown);
        let result = loop {
            tokio::select! {
                biased;

                Some(error) = failures.recv() => break Err(error),

                Some(joined) = loops.join_next() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            break Err(MonitorError::TaskPanicked(e.to_string()));
                        }
                    }
                }

                () = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping...");
                    break Ok(());
                }
            }
        };

        let _ = cancel_tx.send(true);
        while let Some(joined) = loops.join_next().await {
            if let Err(e) = joined {
                tracing::debug!(error = %e, "Poll loop ended abnormally during shutdown");
            }
        }

        result
    }
}
