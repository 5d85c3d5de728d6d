//! Strategy-driven selection of the address to publish.

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

use super::{ReflectError, ReflectionService, Reflector};
use crate::network::IpFamily;
use crate::task::Strategy;

/// Error type for address resolution.
///
/// Recoverable: the poll loop logs it and skips the tick.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Every candidate was tried and none produced an address.
    #[error("no valid address for strategy {strategy} among {} candidate(s)", .candidates.len())]
    NoValidAddress {
        /// Strategy that was applied
        strategy: Strategy,
        /// Candidates that were tried
        candidates: Vec<IpAddr>,
    },
}

/// Turns a candidate address set into the single address to publish.
///
/// Local strategies pick from the candidates directly. Reflective
/// strategies query the configured [`ReflectionService`] once per
/// candidate, in order, until one answers with a parsable address.
#[derive(Debug)]
pub struct AddressResolver<R> {
    reflector: R,
    service: ReflectionService,
    bind_v6: bool,
}

impl<R: Reflector> AddressResolver<R> {
    /// Creates a resolver.
    ///
    /// `bind_v6` controls whether `ReflectV6` queries are sent from the
    /// candidate address; `ReflectV4` queries always are.
    #[must_use]
    pub const fn new(reflector: R, service: ReflectionService, bind_v6: bool) -> Self {
        Self {
            reflector,
            service,
            bind_v6,
        }
    }

    /// Returns the underlying reflector.
    #[must_use]
    pub const fn reflector(&self) -> &R {
        &self.reflector
    }

    /// Returns the configured reflection service.
    #[must_use]
    pub const fn service(&self) -> ReflectionService {
        self.service
    }

    /// Resolves `candidates` under `strategy`.
    ///
    /// Returns `Ok(None)` when there are no candidates. Each reflection
    /// query is bounded by `query_timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoValidAddress`] when no candidate yields an
    /// address.
    pub async fn resolve(
        &self,
        strategy: Strategy,
        candidates: &[IpAddr],
        query_timeout: Duration,
    ) -> Result<Option<IpAddr>, ResolveError> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let found = if strategy.is_reflective() {
            self.reflect_first(strategy, candidates, query_timeout).await
        } else {
            let family = strategy.family();
            candidates.iter().copied().find(|c| family.matches(c))
        };

        found.map(Some).ok_or_else(|| ResolveError::NoValidAddress {
            strategy,
            candidates: candidates.to_vec(),
        })
    }

    async fn reflect_first(
        &self,
        strategy: Strategy,
        candidates: &[IpAddr],
        query_timeout: Duration,
    ) -> Option<IpAddr> {
        for &candidate in candidates {
            let bind = match strategy {
                Strategy::ReflectV6 if !self.bind_v6 => None,
                _ => Some(candidate),
            };
            let family = bind.as_ref().map_or(strategy.family(), IpFamily::of);

            let result = tokio::time::timeout(
                query_timeout,
                self.reflector.reflect(self.service, family, bind),
            )
            .await
            .unwrap_or_else(|_| {
                Err(ReflectError::Timeout {
                    service: self.service,
                    timeout: query_timeout,
                })
            });

            match result {
                Ok(answers) => match answers.first().map(|a| a.trim().parse::<IpAddr>()) {
                    Some(Ok(address)) => {
                        tracing::debug!(
                            candidate = %candidate,
                            address = %address,
                            service = %self.service,
                            "Reflected address"
                        );
                        return Some(address);
                    }
                    Some(Err(_)) => tracing::debug!(
                        candidate = %candidate,
                        answer = %answers[0],
                        "Reflection answer is not an address"
                    ),
                    None => tracing::debug!(candidate = %candidate, "Reflection returned no answer"),
                },
                Err(e) => tracing::debug!(candidate = %candidate, error = %e, "Reflection query failed"),
            }
        }
        None
    }
}
