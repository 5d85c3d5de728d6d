//! Unix interface address enumeration using `getifaddrs`.

use crate::network::{AddressEnumerator, EnumerateError, retain_global_unicast};
use std::ffi::CStr;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ptr;

/// Unix implementation of [`AddressEnumerator`] using `getifaddrs`.
///
/// The interface is matched by its kernel name (`eth0`, `en0`, `ppp0`).
/// An interface that is up but has no addresses yields an empty list, not
/// [`EnumerateError::InterfaceNotFound`].
///
/// # Example
///
/// ```no_run
/// use dnsup::network::{AddressEnumerator, platform::UnixEnumerator};
///
/// let enumerator = UnixEnumerator::new();
/// let addresses = enumerator.addresses("eth0").expect("Failed to list addresses");
/// println!("{addresses:?}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixEnumerator {
    _private: (),
}

impl UnixEnumerator {
    /// Creates a new Unix address enumerator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressEnumerator for UnixEnumerator {
    fn addresses(&self, interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
        let list = IfAddrs::new()
            .map_err(|source| EnumerateError::AddressEnumerationFailed { source })?;

        let mut found = false;
        let mut addresses = Vec::new();
        for entry in list.iter() {
            // SAFETY: ifa_name is a valid NUL-terminated string while the list is alive.
            let name = unsafe { CStr::from_ptr(entry.ifa_name) };
            if name.to_bytes() != interface.as_bytes() {
                continue;
            }
            found = true;
            if let Some(address) = sockaddr_to_ip(entry.ifa_addr) {
                addresses.push(address);
            }
        }

        if !found {
            return Err(EnumerateError::not_found(interface));
        }
        Ok(retain_global_unicast(addresses))
    }
}

/// Owned `getifaddrs` list, released with `freeifaddrs` on drop.
struct IfAddrs {
    head: *mut libc::ifaddrs,
}

impl IfAddrs {
    fn new() -> io::Result<Self> {
        let mut head: *mut libc::ifaddrs = ptr::null_mut();
        // SAFETY: getifaddrs writes a list head into `head` on success.
        let result = unsafe { libc::getifaddrs(&raw mut head) };
        if result != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { head })
    }

    fn iter(&self) -> impl Iterator<Item = &libc::ifaddrs> {
        let mut current = self.head;
        std::iter::from_fn(move || {
            // SAFETY: each node is valid until freeifaddrs runs in Drop.
            let entry = unsafe { current.as_ref()? };
            current = entry.ifa_next;
            Some(entry)
        })
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: head came from a successful getifaddrs call.
            unsafe { libc::freeifaddrs(self.head) };
        }
    }
}

/// Converts an interface address entry to an [`IpAddr`].
///
/// Returns `None` for null pointers and non-IP families such as
/// `AF_PACKET` or `AF_LINK`.
#[allow(clippy::cast_ptr_alignment)]
fn sockaddr_to_ip(addr: *const libc::sockaddr) -> Option<IpAddr> {
    // SAFETY: a non-null ifa_addr points to a sockaddr of the family it declares.
    let sockaddr = unsafe { addr.as_ref()? };
    match i32::from(sockaddr.sa_family) {
        libc::AF_INET => {
            // SAFETY: family is AF_INET, so the storage is a sockaddr_in.
            let sockaddr_in = unsafe { &*(ptr::from_ref(sockaddr).cast::<libc::sockaddr_in>()) };
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                sockaddr_in.sin_addr.s_addr,
            ))))
        }
        libc::AF_INET6 => {
            // SAFETY: family is AF_INET6, so the storage is a sockaddr_in6.
            let sockaddr_in6 =
                unsafe { &*(ptr::from_ref(sockaddr).cast::<libc::sockaddr_in6>()) };
            Some(IpAddr::V6(Ipv6Addr::from(sockaddr_in6.sin6_addr.s6_addr)))
        }
        _ => None,
    }
}
