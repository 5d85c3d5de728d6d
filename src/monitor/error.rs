//! Error types for the monitor layer.

use crate::network::EnumerateError;
use crate::publish::PublishError;
use thiserror::Error;

/// Fatal error from a poll loop.
///
/// The supervisor stops every loop on the first one and returns it.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Listing the interface addresses failed.
    #[error("Interface {interface}: {source}")]
    Enumerate {
        /// Interface the task monitors
        interface: String,
        /// Underlying enumeration error
        #[source]
        source: EnumerateError,
    },

    /// Publishing failed under the abort policy.
    #[error("Publishing {label} failed: {source}")]
    Publish {
        /// Label the task publishes
        label: String,
        /// Underlying publish error
        #[source]
        source: PublishError,
    },

    /// A poll loop panicked.
    #[error("Poll loop panicked: {0}")]
    TaskPanicked(String),
}
