//! Windows interface address enumeration using `GetAdaptersAddresses`.

use crate::network::{AddressEnumerator, EnumerateError, retain_global_unicast};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST,
    GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API reports the required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`AddressEnumerator`] using `GetAdaptersAddresses`.
///
/// An adapter matches when either its friendly name (`Ethernet`, `Wi-Fi`)
/// or its adapter GUID name equals the requested interface.
#[derive(Debug, Clone, Default)]
pub struct WindowsEnumerator {
    _private: (),
}

impl WindowsEnumerator {
    /// Creates a new Windows address enumerator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AddressEnumerator for WindowsEnumerator {
    fn addresses(&self, interface: &str) -> Result<Vec<IpAddr>, EnumerateError> {
        let raw_adapters = get_adapter_addresses()
            .map_err(|source| EnumerateError::AddressEnumerationFailed { source })?;

        // SAFETY: GetAdaptersAddresses returns a buffer aligned for IP_ADAPTER_ADDRESSES_LH.
        #[allow(clippy::cast_ptr_alignment)]
        let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

        // SAFETY: the linked list is valid as long as `raw_adapters` is alive.
        while !current.is_null() {
            let adapter = unsafe { &*current };
            if adapter_matches(adapter, interface) {
                return Ok(retain_global_unicast(collect_addresses(adapter)));
            }
            current = adapter.Next;
        }

        Err(EnumerateError::not_found(interface))
    }
}

fn adapter_matches(adapter: &IP_ADAPTER_ADDRESSES_LH, interface: &str) -> bool {
    // SAFETY: both names are valid NUL-terminated strings inside the adapter buffer.
    let friendly = unsafe { adapter.FriendlyName.to_string() };
    let guid = unsafe { adapter.AdapterName.to_string() };

    friendly.is_ok_and(|name| name == interface) || guid.is_ok_and(|name| name == interface)
}

/// Calls `GetAdaptersAddresses` and returns the raw adapter buffer.
///
/// Retries once with the reported size when the first buffer is too small.
fn get_adapter_addresses() -> io::Result<Vec<u8>> {
    use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    let mut result = call_get_adapters(flags, &mut buffer, &mut size);
    if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(size as usize, 0);
        result = call_get_adapters(flags, &mut buffer, &mut size);
    }

    if result != NO_ERROR.0 {
        #[allow(clippy::cast_possible_wrap)]
        return Err(io::Error::from_raw_os_error(result as i32));
    }
    Ok(buffer)
}

fn call_get_adapters(flags: GET_ADAPTERS_ADDRESSES_FLAGS, buffer: &mut [u8], size: &mut u32) -> u32 {
    let family = u32::from(AF_UNSPEC.0);

    // SAFETY: buffer is at least `size` bytes; the call updates `size` with
    // the required length.
    unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut *size,
        )
    }
}

/// Collects unicast addresses from an adapter in platform order.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<IpAddr> {
    let mut addresses = Vec::new();
    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: each entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let entry = unsafe { &*unicast };

        if let Some(sockaddr) = unsafe { entry.Address.lpSockaddr.as_ref() } {
            match sockaddr.sa_family {
                f if f == AF_INET => {
                    // SAFETY: family is AF_INET.
                    let sockaddr_in =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
                    addresses.push(IpAddr::V4(Ipv4Addr::new(
                        octets.s_b1,
                        octets.s_b2,
                        octets.s_b3,
                        octets.s_b4,
                    )));
                }
                f if f == AF_INET6 => {
                    // SAFETY: family is AF_INET6.
                    let sockaddr_in6 =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                    let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
                    addresses.push(IpAddr::V6(Ipv6Addr::from(octets)));
                }
                _ => {}
            }
        }

        unicast = entry.Next;
    }

    addresses
}
