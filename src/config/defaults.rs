//! Built-in values for options set neither on the command line nor in
//! the config file.

use std::time::Duration;

use crate::resolve::ReflectionService;

/// Default provider API base URL (Gandi LiveDNS v5).
pub const ENDPOINT: &str = "https://dns.api.gandi.net/api/v5";

/// Default record TTL in seconds.
pub const TTL: u32 = crate::publish::DEFAULT_TTL;

/// Default reflection service.
pub const SERVICE: ReflectionService = ReflectionService::Google;

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// Default reflection query timeout in seconds.
pub const QUERY_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of publish attempts.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default initial retry delay in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = 5;

/// Default maximum retry delay in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 60;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// [`POLL_INTERVAL_SECS`] as a [`Duration`].
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}

/// [`QUERY_TIMEOUT_SECS`] as a [`Duration`].
#[must_use]
pub const fn query_timeout() -> Duration {
    Duration::from_secs(QUERY_TIMEOUT_SECS)
}
