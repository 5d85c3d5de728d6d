//! Address classification helpers.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// IPv4.
    V4,
    /// IPv6.
    V6,
}

impl IpFamily {
    /// Returns the family of an address.
    ///
    /// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4.
    #[must_use]
    pub const fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(v6) => {
                if v6.to_ipv4_mapped().is_some() {
                    Self::V4
                } else {
                    Self::V6
                }
            }
        }
    }

    /// Returns true if the address belongs to this family.
    #[must_use]
    pub const fn matches(self, address: &IpAddr) -> bool {
        matches!(
            (self, Self::of(address)),
            (Self::V4, Self::V4) | (Self::V6, Self::V6)
        )
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Returns true for addresses usable as a unicast source beyond the link.
///
/// Excludes unspecified, loopback, multicast, link-local and the IPv4
/// limited broadcast address. Private ranges are kept: behind NAT they are
/// exactly the candidates a reflection query is sent from.
#[must_use]
pub fn is_global_unicast(address: &IpAddr) -> bool {
    match address {
        IpAddr::V4(v4) => is_global_unicast_v4(*v4),
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map_or_else(|| is_global_unicast_v6(v6), is_global_unicast_v4),
    }
}

fn is_global_unicast_v4(v4: Ipv4Addr) -> bool {
    !(v4.is_unspecified()
        || v4.is_loopback()
        || v4.is_multicast()
        || v4.is_link_local()
        || v4.is_broadcast())
}

fn is_global_unicast_v6(v6: &Ipv6Addr) -> bool {
    !(v6.is_unspecified() || v6.is_loopback() || v6.is_multicast() || v6.is_unicast_link_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    mod ip_family {
        use super::*;

        #[test]
        fn of_classifies_plain_addresses() {
            assert_eq!(IpFamily::of(&ip("203.0.113.5")), IpFamily::V4);
            assert_eq!(IpFamily::of(&ip("2001:db8::1")), IpFamily::V6);
        }

        #[test]
        fn mapped_v4_counts_as_v4() {
            assert_eq!(IpFamily::of(&ip("::ffff:203.0.113.5")), IpFamily::V4);
        }

        #[test]
        fn matches_compares_families() {
            assert!(IpFamily::V4.matches(&ip("198.51.100.1")));
            assert!(!IpFamily::V4.matches(&ip("2001:db8::1")));
            assert!(IpFamily::V6.matches(&ip("2001:db8::1")));
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(IpFamily::V4.to_string(), "IPv4");
            assert_eq!(IpFamily::V6.to_string(), "IPv6");
        }
    }

    mod global_unicast {
        use super::*;

        #[test]
        fn public_and_private_addresses_qualify() {
            for addr in ["203.0.113.5", "10.0.0.1", "192.168.1.20", "2001:db8::1", "fd00::1"] {
                assert!(is_global_unicast(&ip(addr)), "{addr}");
            }
        }

        #[test]
        fn special_addresses_are_excluded() {
            for addr in [
                "0.0.0.0",
                "127.0.0.1",
                "169.254.10.1",
                "224.0.0.1",
                "255.255.255.255",
                "::",
                "::1",
                "fe80::1",
                "ff02::1",
                "::ffff:127.0.0.1",
            ] {
                assert!(!is_global_unicast(&ip(addr)), "{addr}");
            }
        }
    }
}
