//! Reflection queries against third-party DNS services.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::Resolver;
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use thiserror::Error;

use super::{QueryKind, ReflectionService};
use crate::network::IpFamily;

/// Error type for a single reflection query.
///
/// Every variant is recoverable: the resolver logs it and moves on to the
/// next candidate.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// The service nameserver hostname could not be resolved.
    #[error("failed to resolve nameserver {nameserver}: {source}")]
    NameserverLookup {
        /// Nameserver `host:port`
        nameserver: &'static str,
        /// Underlying lookup error
        #[source]
        source: std::io::Error,
    },

    /// The nameserver has no address in the required family.
    #[error("nameserver {nameserver} has no {family} address")]
    NoNameserverAddress {
        /// Nameserver `host:port`
        nameserver: &'static str,
        /// Family of the source address
        family: IpFamily,
    },

    /// The DNS query failed.
    #[error("query for {query_name} failed: {source}")]
    Query {
        /// Name that was queried
        query_name: &'static str,
        /// Underlying resolver error
        #[source]
        source: hickory_resolver::ResolveError,
    },

    /// The query did not complete in time.
    #[error("query to {service} timed out after {timeout:?}")]
    Timeout {
        /// Service that was queried
        service: ReflectionService,
        /// Time limit that elapsed
        timeout: Duration,
    },
}

/// Asks a reflection service which source address it observed.
///
/// # Design
///
/// - The bind address is an argument, so one reflector serves every
///   candidate of every task
/// - Returns raw answers; parsing is left to the caller
///
/// # Example
///
/// ```ignore
/// use dnsup::network::IpFamily;
/// use dnsup::resolve::{ReflectError, ReflectionService, Reflector};
/// use std::net::IpAddr;
///
/// struct FixedReflector(&'static str);
///
/// impl Reflector for FixedReflector {
///     async fn reflect(
///         &self,
///         _service: ReflectionService,
///         _family: IpFamily,
///         _bind: Option<IpAddr>,
///     ) -> Result<Vec<String>, ReflectError> {
///         Ok(vec![self.0.to_string()])
///     }
/// }
/// ```
pub trait Reflector: Send + Sync {
    /// Sends one query to `service` and returns its answers in order.
    ///
    /// `family` selects `A` or `AAAA` for host queries. When `bind` is set
    /// the UDP socket is bound to that source address.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError`] when the nameserver cannot be reached or the
    /// query fails.
    fn reflect(
        &self,
        service: ReflectionService,
        family: IpFamily,
        bind: Option<IpAddr>,
    ) -> impl std::future::Future<Output = Result<Vec<String>, ReflectError>> + Send;
}

/// Production [`Reflector`] built on `hickory-resolver`.
///
/// Each query builds a resolver with a single nameserver, no cache and a
/// single attempt, so the answer always reflects the current source address.
#[derive(Debug, Clone)]
pub struct DnsReflector {
    timeout: Duration,
}

impl DnsReflector {
    /// Creates a reflector whose queries give up after `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn nameserver_addr(
        service: ReflectionService,
        family: IpFamily,
    ) -> Result<SocketAddr, ReflectError> {
        let nameserver = service.nameserver();
        let mut addrs = tokio::net::lookup_host(nameserver)
            .await
            .map_err(|source| ReflectError::NameserverLookup { nameserver, source })?;

        addrs
            .find(|addr| family.matches(&addr.ip()))
            .ok_or(ReflectError::NoNameserverAddress { nameserver, family })
    }

    fn build_resolver(
        &self,
        nameserver: SocketAddr,
        bind: Option<IpAddr>,
    ) -> Resolver<TokioConnectionProvider> {
        let mut server = NameServerConfig::new(nameserver, Protocol::Udp);
        server.bind_addr = bind.map(|ip| SocketAddr::new(ip, 0));

        let config = ResolverConfig::from_parts(None, vec![], vec![server]);

        let mut opts = ResolverOpts::default();
        opts.attempts = 1;
        opts.cache_size = 0;
        opts.timeout = self.timeout;

        Resolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build()
    }

    /// Sends one `kind` query for `query_name` to `nameserver`.
    ///
    /// `family` picks `A` or `AAAA` for host queries and is ignored for
    /// `TXT`. TXT character strings of one record are joined into a single
    /// answer.
    async fn query(
        &self,
        nameserver: SocketAddr,
        query_name: &'static str,
        kind: QueryKind,
        family: IpFamily,
        bind: Option<IpAddr>,
    ) -> Result<Vec<String>, ReflectError> {
        let resolver = self.build_resolver(nameserver, bind);
        let query_error = |source| ReflectError::Query { query_name, source };

        let answers = match (kind, family) {
            (QueryKind::Host, IpFamily::V4) => resolver
                .ipv4_lookup(query_name)
                .await
                .map_err(query_error)?
                .iter()
                .map(|a| a.0.to_string())
                .collect(),
            (QueryKind::Host, IpFamily::V6) => resolver
                .ipv6_lookup(query_name)
                .await
                .map_err(query_error)?
                .iter()
                .map(|aaaa| aaaa.0.to_string())
                .collect(),
            (QueryKind::Txt, _) => resolver
                .txt_lookup(query_name)
                .await
                .map_err(query_error)?
                .iter()
                .map(|txt| {
                    txt.txt_data()
                        .iter()
                        .map(|chunk| String::from_utf8_lossy(chunk))
                        .collect::<String>()
                })
                .collect(),
        };

        Ok(answers)
    }
}

impl Reflector for DnsReflector {
    async fn reflect(
        &self,
        service: ReflectionService,
        family: IpFamily,
        bind: Option<IpAddr>,
    ) -> Result<Vec<String>, ReflectError> {
        // The transport family follows the source address when bound.
        let transport = bind.as_ref().map_or(family, IpFamily::of);
        let nameserver = Self::nameserver_addr(service, transport).await?;

        tracing::debug!(
            service = %service,
            nameserver = %nameserver,
            bind = ?bind,
            "Sending reflection query"
        );

        self.query(nameserver, service.query_name(), service.query_kind(), family, bind)
            .await
    }
}
