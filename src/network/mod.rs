//! Network layer for listing interface addresses.
//!
//! This module provides types and traits for:
//! - Address family classification ([`IpFamily`])
//! - Global-unicast filtering ([`is_global_unicast`])
//! - Listing interface addresses ([`AddressEnumerator`])
//! - Platform-specific implementations ([`platform`])

mod address;
mod enumerator;
pub mod platform;

pub use address::{IpFamily, is_global_unicast};
pub use enumerator::{AddressEnumerator, EnumerateError, retain_global_unicast};
