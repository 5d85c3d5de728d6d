//! Address resolution: choosing what to publish for an interface.
//!
//! This module provides:
//! - The reflection service directory ([`ReflectionService`])
//! - Reflection queries ([`Reflector`], [`DnsReflector`])
//! - Strategy-driven selection ([`AddressResolver`])

mod reflector;
mod resolver;
mod service;


pub use reflector::{DnsReflector, ReflectError, Reflector};
pub use resolver::{AddressResolver, ResolveError};
pub use service::{QueryKind, ReflectionService, UnknownServiceError};
