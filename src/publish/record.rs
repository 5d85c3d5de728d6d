//! DNS record types derived from address family.

use std::fmt;
use std::net::IpAddr;

use crate::network::IpFamily;

/// Address record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
}

impl RecordType {
    /// Returns the record type that holds `address`.
    ///
    /// IPv4-mapped IPv6 addresses map to [`RecordType::A`].
    #[must_use]
    pub const fn for_address(address: &IpAddr) -> Self {
        match IpFamily::of(address) {
            IpFamily::V4 => Self::A,
            IpFamily::V6 => Self::Aaaa,
        }
    }

    /// Record type as used in DNS and provider APIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
