//! Monitor layer: per-task polling and supervision.
//!
//! This module provides types for:
//! - Detecting address changes ([`ChangeTracker`])
//! - Polling a single task ([`PollLoop`], [`LoopOptions`], [`PublishFailurePolicy`])
//! - Running every task concurrently ([`Supervisor`])
//! - Fatal error reporting ([`MonitorError`])

mod change;
mod error;
mod poll_loop;
mod supervisor;

#[cfg(test)]
mod test_fixtures;

pub use change::ChangeTracker;
pub use error::MonitorError;
pub use poll_loop::{LoopOptions, PollLoop, PublishFailurePolicy, TickOutcome};
pub use supervisor::Supervisor;
