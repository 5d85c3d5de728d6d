//! Publisher trait and Gandi LiveDNS implementation.

use std::net::IpAddr;

use serde::Serialize;

use crate::time::{Sleeper, TokioSleeper};

use super::{
    HttpClient, HttpError, HttpRequest, PublishError, RecordType, RetryPolicy, RetryableError,
};

/// Result of a publish call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The provider accepted the record.
    Updated {
        /// Record type that was written
        record_type: RecordType,
    },
    /// The address was not usable; nothing was sent.
    Skipped,
}

/// Upserts address records at a DNS provider.
///
/// # Implementation Notes
///
/// - `address` is textual; an unparsable value yields
///   [`PublishOutcome::Skipped`] without any I/O
/// - The record type follows the address family
/// - Calls are idempotent and may run concurrently
pub trait Publisher: Send + Sync {
    /// Sets the record for `label` to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the provider rejects the update or every
    /// attempt fails.
    fn publish(
        &self,
        label: &str,
        address: &str,
    ) -> impl std::future::Future<Output = Result<PublishOutcome, PublishError>> + Send;
}

/// Request body for a Gandi LiveDNS rrset replacement.
#[derive(Serialize)]
struct RecordUpdate<'a> {
    rrset_ttl: u32,
    rrset_values: [&'a str; 1],
}

/// Default record TTL in seconds.
pub const DEFAULT_TTL: u32 = 300;

/// Header carrying the Gandi API key.
const API_KEY_HEADER: &str = "x-api-key";

/// Gandi LiveDNS v5 publisher with retry support.
///
/// Sends `PUT {endpoint}/domains/{domain}/records/{label}/{A|AAAA}` with a
/// JSON body holding the TTL and the single address value.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper for retry delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use dnsup::publish::{GandiPublisher, ReqwestClient};
/// use url::Url;
///
/// let publisher = GandiPublisher::new(
///     ReqwestClient::new().unwrap(),
///     Url::parse("https://dns.api.gandi.net/api/v5").unwrap(),
///     "example.com",
/// )
/// .with_ttl(600);
/// ```
#[derive(Debug)]
pub struct GandiPublisher<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    endpoint: url::Url,
    domain: String,
    api_key: Option<http::HeaderValue>,
    ttl: u32,
    retry_policy: RetryPolicy,
}

impl<H> GandiPublisher<H, TokioSleeper> {
    /// Creates a publisher with no API key, the default TTL, the default
    /// retry policy and [`TokioSleeper`] for delays.
    #[must_use]
    pub fn new(client: H, endpoint: url::Url, domain: impl Into<String>) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            endpoint,
            domain: domain.into(),
            api_key: None,
            ttl: DEFAULT_TTL,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> GandiPublisher<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> GandiPublisher<H, S2> {
        GandiPublisher {
            client: self.client,
            sleeper,
            endpoint: self.endpoint,
            domain: self.domain,
            api_key: self.api_key,
            ttl: self.ttl,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the API key sent in `X-Api-Key`.
    #[must_use]
    pub fn with_api_key(mut self, mut key: http::HeaderValue) -> Self {
        key.set_sensitive(true);
        self.api_key = Some(key);
        self
    }

    /// Sets the record TTL in seconds.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the zone records are written to.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    fn record_url(&self, label: &str, record_type: RecordType) -> Result<url::Url, PublishError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| PublishError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
            })?
            .pop_if_empty()
            .extend(["domains", self.domain.as_str(), "records", label, record_type.as_str()]);
        Ok(url)
    }

    fn build_request(
        &self,
        label: &str,
        address: &IpAddr,
        record_type: RecordType,
    ) -> Result<HttpRequest, PublishError> {
        let value = address.to_string();
        let body = serde_json::to_vec(&RecordUpdate {
            rrset_ttl: self.ttl,
            rrset_values: [value.as_str()],
        })?;

        let mut request = HttpRequest::put(self.record_url(label, record_type)?)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_body(body);

        if let Some(key) = &self.api_key {
            request = request.with_header(http::HeaderName::from_static(API_KEY_HEADER), key.clone());
        }

        Ok(request)
    }
}

impl<H: HttpClient, S: Sleeper> GandiPublisher<H, S> {
    async fn execute_request(&self, request: &HttpRequest) -> Result<(), RetryableError> {
        let response = self.client.request(request.clone()).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(RetryableError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    async fn send_with_retry(&self, request: &HttpRequest) -> Result<(), PublishError> {
        let mut attempt = 1;
        loop {
            let error = match self.execute_request(request).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            if !error.is_retryable() {
                return Err(PublishError::Request(error));
            }
            if !self.retry_policy.should_retry(attempt) {
                return Err(PublishError::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = self.retry_policy.delay_for_retry(attempt - 1);
            tracing::warn!(
                attempt,
                delay = ?delay,
                error = %error,
                "Publish attempt failed, retrying"
            );
            self.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}

impl<H: HttpClient, S: Sleeper> Publisher for GandiPublisher<H, S> {
    async fn publish(&self, label: &str, address: &str) -> Result<PublishOutcome, PublishError> {
        let Ok(parsed) = address.trim().parse::<IpAddr>() else {
            tracing::debug!(label, address, "Not an IP address, skipping publish");
            return Ok(PublishOutcome::Skipped);
        };
        let parsed = parsed.to_canonical();
        let record_type = RecordType::for_address(&parsed);

        let request = self.build_request(label, &parsed, record_type)?;
        tracing::debug!(
            label,
            address = %parsed,
            record_type = %record_type,
            url = %request.url,
            "Publishing record"
        );

        self.send_with_retry(&request).await?;
        Ok(PublishOutcome::Updated { record_type })
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Transient failures (network, timeouts, 5xx, 429, 408) are retried by
/// [`GandiPublisher`]; everything else fails immediately.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for RetryableError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::NonSuccessStatus { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
        }
    }
}
