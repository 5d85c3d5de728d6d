//! Directory of DNS reflection services.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a reflection service reports the observed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// `A`/`AAAA` lookup; the answer is the address itself.
    Host,
    /// `TXT` lookup; the answer is the address as text.
    Txt,
}

/// Third-party DNS service that echoes back the querying source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReflectionService {
    /// Akamai `whoami.akamai.net`.
    Akamai,
    /// Cloudflare `whoami.cloudflare.com` TXT.
    Cloudflare,
    /// Google `o-o.myaddr.l.google.com` TXT.
    #[default]
    Google,
    /// OpenDNS `myip.opendns.com`.
    OpenDns,
}

impl ReflectionService {
    /// All known services, in display order.
    pub const ALL: [Self; 4] = [Self::Akamai, Self::Cloudflare, Self::Google, Self::OpenDns];

    /// Authoritative nameserver to query, as `host:port`.
    #[must_use]
    pub const fn nameserver(self) -> &'static str {
        match self {
            Self::Akamai => "ns1-1.akamaitech.net:53",
            Self::Cloudflare => "armando.ns.cloudflare.com:53",
            Self::Google => "ns1.google.com:53",
            Self::OpenDns => "resolver1.opendns.com:53",
        }
    }

    /// Name whose answer reflects the source address.
    #[must_use]
    pub const fn query_name(self) -> &'static str {
        match self {
            Self::Akamai => "whoami.akamai.net.",
            Self::Cloudflare => "whoami.cloudflare.com.",
            Self::Google => "o-o.myaddr.l.google.com.",
            Self::OpenDns => "myip.opendns.com.",
        }
    }

    /// Record kind the service answers with.
    #[must_use]
    pub const fn query_kind(self) -> QueryKind {
        match self {
            Self::Akamai | Self::OpenDns => QueryKind::Host,
            Self::Cloudflare | Self::Google => QueryKind::Txt,
        }
    }

    /// Short configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Akamai => "akamai",
            Self::Cloudflare => "cloudflare",
            Self::Google => "google",
            Self::OpenDns => "opendns",
        }
    }
}

impl fmt::Display for ReflectionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a service name is not in the directory.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reflection service '{name}': expected one of akamai, cloudflare, google, opendns")]
pub struct UnknownServiceError {
    /// The rejected name
    pub name: String,
}

impl FromStr for ReflectionService {
    type Err = UnknownServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownServiceError {
                name: s.to_string(),
            })
    }
}
