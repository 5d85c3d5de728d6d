//! Address enumeration trait and error types.

use std::net::IpAddr;

use thiserror::Error;

use super::is_global_unicast;

/// Error type for address enumeration.
///
/// Both variants are fatal for the task that hit them.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// No interface with the requested name exists.
    #[error("interface not found: {interface}")]
    InterfaceNotFound {
        /// The requested interface name
        interface: String,
    },

    /// The platform address query failed.
    #[error("address enumeration failed: {source}")]
    AddressEnumerationFailed {
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl EnumerateError {
    /// Creates an `InterfaceNotFound` error.
    #[must_use]
    pub fn not_found(interface: impl Into<String>) -> Self {
        Self::InterfaceNotFound {
            interface: interface.into(),
        }
    }
}

/// Lists the addresses assigned to a network interface.
///
/// # Design
///
/// - Seam between the poll loop and the OS; tests inject mocks
/// - Platform-specific implementations live in [`super::platform`]
///
/// # Example
///
/// ```ignore
/// use dnsup::network::{AddressEnumerator, EnumerateError};
/// use std::net::IpAddr;
///
/// struct FixedEnumerator(Vec<IpAddr>);
///
/// impl AddressEnumerator for FixedEnumerator {
///     fn addresses(&self, _interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait AddressEnumerator: Send + Sync {
    /// Returns the global-unicast addresses assigned to `interface`.
    ///
    /// Order follows the platform and is not guaranteed to be stable
    /// across calls or to put either family first.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError::InterfaceNotFound`] if the interface does
    /// not exist and [`EnumerateError::AddressEnumerationFailed`] if the
    /// OS query fails.
    fn addresses(&self, interface: &str) -> Result<Vec<IpAddr>, EnumerateError>;
}

/// Keeps only global-unicast addresses, preserving order.
#[must_use]
pub fn retain_global_unicast(addresses: impl IntoIterator<Item = IpAddr>) -> Vec<IpAddr> {
    addresses
        .into_iter()
        .filter(is_global_unicast)
        .collect()
}
