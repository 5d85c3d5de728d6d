//! Platform-specific interface address enumeration.
//!
//! # Platform Support
//!
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate.
//! - **Unix** (Linux, macOS, BSD): `getifaddrs` via `libc`.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixEnumerator;

#[cfg(windows)]
pub use windows::WindowsEnumerator;

#[cfg(unix)]
pub use unix::UnixEnumerator as PlatformEnumerator;

#[cfg(windows)]
pub use windows::WindowsEnumerator as PlatformEnumerator;
