//! Wire-level view of a record update, independent of the HTTP library.
//!
//! [`GandiPublisher`](super::GandiPublisher) only ever issues `PUT` requests
//! with a JSON body and looks at nothing but the status and body of the
//! reply, so that is all these types carry.

use super::HttpError;

/// A record update on its way to the provider.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Always `PUT` for record updates
    pub method: http::Method,
    /// `.../domains/{domain}/records/{label}/{type}`
    pub url: url::Url,
    /// `Content-Type` and, when configured, `X-Api-Key`
    pub headers: http::HeaderMap,
    /// JSON rrset
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a `PUT` to `url` with no headers and no body.
    #[must_use]
    pub fn put(url: url::Url) -> Self {
        Self {
            method: http::Method::PUT,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends `name: value`; earlier values for `name` are kept.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// The provider's reply, read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Reply status
    pub status: http::StatusCode,
    /// Raw reply body, usually a JSON message from the provider
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Whether the provider accepted the update (any 2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, for error messages. `None` if it is not UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Delivers record updates to the provider API.
///
/// [`ReqwestClient`](super::ReqwestClient) is the real transport; tests
/// substitute a client that replays canned replies and records requests.
///
/// ```ignore
/// use dnsup::publish::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Accepting;
///
/// impl HttpClient for Accepting {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(http::StatusCode::CREATED, Vec::new()))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` and reads the full reply.
    ///
    /// A 4xx or 5xx reply is still `Ok`; the publisher decides what it
    /// means.
    ///
    /// # Errors
    ///
    /// [`HttpError`] when no reply was obtained: the connection failed,
    /// the request timed out or the URL was rejected.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_url() -> url::Url {
        url::Url::parse("https://api.example.net/v5/domains/example.com/records/home/A").unwrap()
    }

    #[test]
    fn put_starts_bare() {
        let req = HttpRequest::put(record_url());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, record_url());
        assert!(req.headers.is_empty());
        assert_eq!(req.body, None);
    }

    #[test]
    fn repeated_header_keeps_both_values() {
        let name = http::HeaderName::from_static("x-api-key");
        let req = HttpRequest::put(record_url())
            .with_header(name.clone(), http::HeaderValue::from_static("a"))
            .with_header(name.clone(), http::HeaderValue::from_static("b"));

        assert_eq!(req.headers.get_all(&name).iter().count(), 2);
    }

    #[test]
    fn body_is_attached() {
        let req = HttpRequest::put(record_url()).with_body(b"{}".to_vec());

        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn reply_status_and_text() {
        let accepted = HttpResponse::new(http::StatusCode::CREATED, b"done".to_vec());
        let refused = HttpResponse::new(http::StatusCode::FORBIDDEN, vec![0xff]);

        assert!(accepted.is_success());
        assert_eq!(accepted.body_text(), Some("done"));
        assert!(!refused.is_success());
        assert_eq!(refused.body_text(), None);
    }
}
