//! Tests for `Publisher` and `GandiPublisher`.

use super::*;
use crate::time::InstantSleeper;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock HTTP client that replays a sequence of responses.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn status(status: http::StatusCode) -> Result<HttpResponse, HttpError> {
        Ok(HttpResponse::new(status, Vec::new()))
    }

    fn success() -> Self {
        Self::new(vec![Self::status(http::StatusCode::CREATED)])
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(HttpError::Timeout))
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

fn endpoint() -> url::Url {
    url::Url::parse("https://dns.api.gandi.net/api/v5").unwrap()
}

type TestPublisher = GandiPublisher<Arc<MockClient>, InstantSleeper>;

fn keyless(client: MockClient, endpoint: url::Url, domain: &str) -> (TestPublisher, Arc<MockClient>) {
    let client = Arc::new(client);
    let publisher =
        GandiPublisher::new(Arc::clone(&client), endpoint, domain).with_sleeper(InstantSleeper);
    (publisher, client)
}

fn publisher(client: MockClient) -> (TestPublisher, Arc<MockClient>) {
    let (publisher, client) = keyless(client, endpoint(), "example.com");
    let publisher = publisher.with_api_key(http::HeaderValue::from_static("secret-key"));
    (publisher, client)
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn v4_address_puts_a_record() {
        let (publisher, client) = publisher(MockClient::success());

        let outcome = publisher.publish("home", "203.0.113.5").await.unwrap();

        assert_eq!(
            outcome,
            PublishOutcome::Updated {
                record_type: RecordType::A
            }
        );
        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(
            req.url.as_str(),
            "https://dns.api.gandi.net/api/v5/domains/example.com/records/home/A"
        );
    }

    #[tokio::test]
    async fn v6_address_puts_aaaa_record() {
        let (publisher, client) = publisher(MockClient::success());

        let outcome = publisher.publish("vpn", "2001:db8::1").await.unwrap();

        assert_eq!(
            outcome,
            PublishOutcome::Updated {
                record_type: RecordType::Aaaa
            }
        );
        assert!(
            client.captured_requests()[0]
                .url
                .as_str()
                .ends_with("/records/vpn/AAAA")
        );
    }

    #[tokio::test]
    async fn headers_and_body() {
        let (publisher, client) = publisher(MockClient::success());
        let publisher = publisher.with_ttl(600);

        publisher.publish("home", "203.0.113.5").await.unwrap();

        let req = &client.captured_requests()[0];
        assert_eq!(req.headers[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(req.headers["x-api-key"], "secret-key");

        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"rrset_ttl": 600, "rrset_values": ["203.0.113.5"]})
        );
    }

    #[tokio::test]
    async fn mapped_address_is_published_as_v4() {
        let (publisher, client) = publisher(MockClient::success());

        publisher.publish("home", "::ffff:203.0.113.5").await.unwrap();

        let req = &client.captured_requests()[0];
        assert!(req.url.as_str().ends_with("/records/home/A"));
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["rrset_values"][0], "203.0.113.5");
    }

    #[tokio::test]
    async fn no_api_key_header_without_key() {
        let (publisher, client) = keyless(MockClient::success(), endpoint(), "example.com");

        publisher.publish("home", "203.0.113.5").await.unwrap();

        assert!(
            !client.captured_requests()[0]
                .headers
                .contains_key("x-api-key")
        );
    }

    #[tokio::test]
    async fn endpoint_trailing_slash_is_ignored() {
        let (publisher, client) = keyless(
            MockClient::success(),
            url::Url::parse("https://api.example.net/v5/").unwrap(),
            "example.org",
        );

        publisher.publish("www", "198.51.100.3").await.unwrap();

        assert_eq!(
            client.captured_requests()[0].url.as_str(),
            "https://api.example.net/v5/domains/example.org/records/www/A"
        );
    }

    #[tokio::test]
    async fn default_ttl_is_300() {
        let (publisher, _client) = publisher(MockClient::success());
        assert_eq!(publisher.ttl(), DEFAULT_TTL);
        assert_eq!(DEFAULT_TTL, 300);
    }
}

mod skipping {
    use super::*;

    #[tokio::test]
    async fn garbage_address_is_skipped_without_io() {
        let (publisher, client) = publisher(MockClient::success());

        let outcome = publisher.publish("home", "not-an-ip").await.unwrap();

        assert_eq!(outcome, PublishOutcome::Skipped);
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn empty_address_is_skipped() {
        let (publisher, client) = publisher(MockClient::success());

        let outcome = publisher.publish("home", "").await.unwrap();

        assert_eq!(outcome, PublishOutcome::Skipped);
        assert_eq!(client.calls(), 0);
    }
}

mod retries {
    use super::*;

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let client = MockClient::new(vec![
            Err(HttpError::Timeout),
            MockClient::status(http::StatusCode::SERVICE_UNAVAILABLE),
            MockClient::status(http::StatusCode::OK),
        ]);
        let (publisher, client) = publisher(client);

        let outcome = publisher.publish("home", "203.0.113.5").await;

        assert!(outcome.is_ok());
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn client_errors_fail_immediately() {
        let client = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::FORBIDDEN,
            b"{\"message\":\"denied\"}".to_vec(),
        ))]);
        let (publisher, client) = publisher(client);

        let err = publisher.publish("home", "203.0.113.5").await.unwrap_err();

        assert!(matches!(
            err,
            PublishError::Request(RetryableError::NonSuccessStatus { status, .. })
                if status == http::StatusCode::FORBIDDEN
        ));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_report_attempts() {
        let (publisher, client) = publisher(MockClient::new(vec![]));
        let publisher = publisher.with_retry_policy(
            RetryPolicy::new()
                .with_max_attempts(4)
                .with_initial_delay(Duration::ZERO),
        );

        let err = publisher.publish("home", "203.0.113.5").await.unwrap_err();

        assert!(matches!(
            err,
            PublishError::MaxRetriesExceeded {
                attempts: 4,
                last_error: RetryableError::Http(HttpError::Timeout)
            }
        ));
        assert_eq!(client.calls(), 4);
    }

    #[tokio::test]
    async fn single_attempt_policy_does_not_retry() {
        let (publisher, client) = publisher(MockClient::new(vec![Err(HttpError::Timeout)]));
        let publisher = publisher.with_retry_policy(RetryPolicy::new().with_max_attempts(1));

        let err = publisher.publish("home", "203.0.113.5").await.unwrap_err();

        assert!(matches!(err, PublishError::MaxRetriesExceeded { attempts: 1, .. }));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_between_attempts() {
        let client = MockClient::new(vec![
            Err(HttpError::Timeout),
            MockClient::status(http::StatusCode::OK),
        ]);
        let publisher = GandiPublisher::new(client, endpoint(), "example.com").with_retry_policy(
            RetryPolicy::new().with_initial_delay(Duration::from_secs(7)),
        );
        let start = tokio::time::Instant::now();

        publisher.publish("home", "203.0.113.5").await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(7));
    }
}

mod retryability {
    use super::*;

    fn status(code: u16) -> RetryableError {
        RetryableError::NonSuccessStatus {
            status: http::StatusCode::from_u16(code).unwrap(),
            body: None,
        }
    }

    #[test]
    fn transport_errors() {
        assert!(HttpError::Timeout.is_retryable());
        assert!(HttpError::Connection("reset".into()).is_retryable());
        assert!(!HttpError::InvalidUrl("bad".to_string()).is_retryable());
    }

    #[test]
    fn statuses() {
        for code in [500, 502, 503, 429, 408] {
            assert!(status(code).is_retryable(), "{code}");
        }
        for code in [400, 401, 403, 404, 409] {
            assert!(!status(code).is_retryable(), "{code}");
        }
    }
}
