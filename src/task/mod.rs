//! Monitoring task model.
//!
//! A [`Task`] describes one interface-to-label binding: which interface to
//! inspect, which DNS label to publish under, how to derive the address
//! ([`Strategy`]) and how often to poll. Tasks are parsed once at startup
//! from `<interface>[:<label>[:<strategy>[:<poll-interval>]]]` strings and
//! never change afterwards.

mod duration;
mod error;


pub use duration::parse_duration;
pub use error::TaskSpecError;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::network::IpFamily;

/// Field separator in a task specification.
pub const SPEC_SEPARATOR: char = ':';

/// How the address to publish is derived from an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// First IPv4 address assigned to the interface.
    #[default]
    LocalV4,
    /// First IPv6 address assigned to the interface.
    LocalV6,
    /// Address observed by a reflection service, queried from each IPv4
    /// candidate with the UDP source bound to that candidate.
    ReflectV4,
    /// Address observed by a reflection service over IPv6.
    ReflectV6,
}

impl Strategy {
    /// Address family this strategy targets.
    #[must_use]
    pub const fn family(self) -> IpFamily {
        match self {
            Self::LocalV4 | Self::ReflectV4 => IpFamily::V4,
            Self::LocalV6 | Self::ReflectV6 => IpFamily::V6,
        }
    }

    /// Returns true if this strategy queries an external reflection service.
    #[must_use]
    pub const fn is_reflective(self) -> bool {
        matches!(self, Self::ReflectV4 | Self::ReflectV6)
    }
}

impl FromStr for Strategy {
    type Err = TaskSpecError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "assign" | "assigned" | "inet" | "inet4" => Ok(Self::LocalV4),
            "inet6" => Ok(Self::LocalV6),
            "resolve" | "resolv" | "resolv4" => Ok(Self::ReflectV4),
            "resolv6" => Ok(Self::ReflectV6),
            _ => Err(TaskSpecError::InvalidStrategy {
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocalV4 => "inet4",
            Self::LocalV6 => "inet6",
            Self::ReflectV4 => "resolv4",
            Self::ReflectV6 => "resolv6",
        };
        f.write_str(name)
    }
}

/// One monitored interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    interface: String,
    label: String,
    strategy: Strategy,
    poll_interval: Duration,
}

impl Task {
    /// Creates a task, rejecting empty names and a zero interval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSpecError`] if `interface` or `label` is empty or
    /// `poll_interval` is zero.
    pub fn new(
        interface: impl Into<String>,
        label: impl Into<String>,
        strategy: Strategy,
        poll_interval: Duration,
    ) -> Result<Self, TaskSpecError> {
        let interface = interface.into();
        let label = label.into();

        if interface.is_empty() {
            return Err(TaskSpecError::EmptyField { field: "interface" });
        }
        if label.is_empty() {
            return Err(TaskSpecError::EmptyField { field: "label" });
        }
        if poll_interval.is_zero() {
            return Err(TaskSpecError::ZeroInterval);
        }

        Ok(Self {
            interface,
            label,
            strategy,
            poll_interval,
        })
    }

    /// Parses a single task specification.
    ///
    /// Omitted fields default as follows: label to the interface name,
    /// strategy to [`Strategy::LocalV4`], interval to `default_interval`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSpecError`] for a wrong field count, an unknown
    /// strategy token or a malformed duration.
    pub fn parse(spec: &str, default_interval: Duration) -> Result<Self, TaskSpecError> {
        let fields: Vec<&str> = spec.split(SPEC_SEPARATOR).collect();

        let (interface, label, strategy, interval) = match fields.as_slice() {
            [interface] => (*interface, *interface, Strategy::default(), default_interval),
            [interface, label] => (*interface, *label, Strategy::default(), default_interval),
            [interface, label, strategy] => (*interface, *label, strategy.parse()?, default_interval),
            [interface, label, strategy, interval] => (
                *interface,
                *label,
                strategy.parse()?,
                parse_duration(interval)?,
            ),
            _ => {
                return Err(TaskSpecError::InvalidSpecification {
                    spec: spec.to_string(),
                });
            }
        };

        Self::new(interface, label, strategy, interval)
    }

    /// Parses every specification, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskSpecError`] encountered; no tasks are
    /// returned in that case.
    pub fn parse_all<I, S>(specs: I, default_interval: Duration) -> Result<Vec<Self>, TaskSpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs
            .into_iter()
            .map(|spec| Self::parse(spec.as_ref(), default_interval))
            .collect()
    }

    /// OS interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// DNS label the resolved address is published under.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Address derivation strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Time between two polls.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{:?}",
            self.interface, self.label, self.strategy, self.poll_interval
        )
    }
}
