//! Tests for the run module.

use super::*;
use dnsup::config::Cli;
use dnsup::publish::{HttpRequest, HttpResponse};
use dnsup::resolve::ReflectionService;
use std::time::Duration;

/// HTTP client that is never expected to be called.
struct UnusedClient;

impl HttpClient for UnusedClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        Err(HttpError::Timeout)
    }
}

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full = vec!["dnsup"];
    full.extend(args);
    ValidatedConfig::from_raw(&Cli::parse_from_iter(full), None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn http_client_error_displays_source() {
        let error = RunError::HttpClient(HttpError::InvalidUrl("x".to_string()));
        assert!(error.to_string().contains("Failed to create HTTP client"));
    }

    #[test]
    fn monitor_error_is_transparent() {
        let inner = MonitorError::TaskPanicked("boom".to_string());
        let expected = inner.to_string();

        let error = RunError::from(inner);

        assert_eq!(error.to_string(), expected);
    }
}

mod wiring {
    use super::*;

    #[test]
    fn publisher_carries_provider_settings() {
        let config = config(&[
            "--apikey",
            "secret",
            "--ttl",
            "900",
            "--retry-max",
            "7",
            "example.com",
            "eth0",
        ]);

        let publisher = create_publisher(&config, UnusedClient);

        assert_eq!(publisher.domain(), "example.com");
        assert_eq!(publisher.ttl(), 900);
        assert_eq!(publisher.retry_policy().max_attempts, 7);
    }

    #[test]
    fn resolver_carries_discovery_settings() {
        let config = config(&[
            "--dry-run",
            "--service",
            "akamai",
            "--query-timeout",
            "3s",
            "example.com",
            "eth0",
        ]);

        let resolver = create_resolver(&config);

        assert_eq!(resolver.service(), ReflectionService::Akamai);
        assert_eq!(config.loop_options.query_timeout, Duration::from_secs(3));
    }
}
