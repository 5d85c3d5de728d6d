//! Change detection against the last published address.

use std::net::IpAddr;

/// Remembers the last address a poll loop acted on.
///
/// Only a resolved address that differs from the remembered one counts as a
/// change. Starts empty, so the first resolved address is always a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    last: Option<IpAddr>,
}

impl ChangeTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records `address` and returns true if it differs from the last one.
    pub fn observe(&mut self, address: IpAddr) -> bool {
        if self.last == Some(address) {
            return false;
        }
        self.last = Some(address);
        true
    }

    /// Returns the remembered address.
    #[must_use]
    pub const fn last(&self) -> Option<IpAddr> {
        self.last
    }
}
