//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, FailurePolicyArg, ServiceArg};
use clap::Parser;

mod parsing {
    use super::*;

    #[test]
    fn parse_domain_and_interfaces() {
        let cli = Cli::parse_from_iter(["dnsup", "example.com", "eth0", "wlan0:home:resolv4"]);

        assert_eq!(cli.domain.as_deref(), Some("example.com"));
        assert_eq!(cli.interfaces, vec!["eth0", "wlan0:home:resolv4"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_without_positionals() {
        let cli = Cli::parse_from_iter(["dnsup", "--config", "dnsup.toml"]);

        assert!(cli.domain.is_none());
        assert!(cli.interfaces.is_empty());
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("dnsup.toml"))
        );
    }

    #[test]
    fn parse_provider_options() {
        let cli = Cli::parse_from_iter([
            "dnsup",
            "--apikey",
            "secret",
            "--ttl",
            "600",
            "--endpoint",
            "https://api.example.net/v5",
            "example.com",
            "eth0",
        ]);

        assert_eq!(cli.apikey.as_deref(), Some("secret"));
        assert_eq!(cli.ttl, Some(600));
        assert_eq!(cli.endpoint.as_deref(), Some("https://api.example.net/v5"));
    }

    #[test]
    fn parse_discovery_options() {
        let cli = Cli::parse_from_iter([
            "dnsup",
            "--service",
            "opendns",
            "--query-timeout",
            "3s",
            "--poll-interval",
            "5m",
            "--bind-v6",
            "example.com",
            "eth0",
        ]);

        assert_eq!(cli.service, Some(ServiceArg::OpenDns));
        assert_eq!(cli.query_timeout.as_deref(), Some("3s"));
        assert_eq!(cli.poll_interval.as_deref(), Some("5m"));
        assert!(cli.bind_v6);
    }

    #[test]
    fn service_is_case_insensitive() {
        let cli = Cli::parse_from_iter(["dnsup", "--service", "CloudFlare", "example.com", "eth0"]);
        assert_eq!(cli.service, Some(ServiceArg::Cloudflare));
    }

    #[test]
    fn parse_failure_policy() {
        let cli = Cli::parse_from_iter(["dnsup", "--on-publish-failure", "abort", "d", "eth0"]);
        assert_eq!(cli.on_publish_failure, Some(FailurePolicyArg::Abort));
    }

    #[test]
    fn parse_retry_options() {
        let cli = Cli::parse_from_iter(["dnsup", "--retry-max", "5", "--retry-delay", "2", "d", "e"]);

        assert_eq!(cli.retry_max, Some(5));
        assert_eq!(cli.retry_delay, Some(2));
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::parse_from_iter(["dnsup", "--dry-run", "-v", "example.com", "eth0"]);

        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn flags_default_to_false() {
        let cli = Cli::parse_from_iter(["dnsup", "example.com", "eth0"]);

        assert!(!cli.dry_run);
        assert!(!cli.verbose);
        assert!(!cli.bind_v6);
    }

    #[test]
    fn unknown_service_is_rejected() {
        let result = Cli::try_parse_from(["dnsup", "--service", "bing", "example.com", "eth0"]);
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_ttl_is_rejected() {
        let result = Cli::try_parse_from(["dnsup", "--ttl", "soon", "example.com", "eth0"]);
        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn init_with_default_output() {
        let cli = Cli::parse_from_iter(["dnsup", "init"]);

        assert!(cli.is_init());
        let Some(Command::Init { output }) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, std::path::PathBuf::from("dnsup.toml"));
    }

    #[test]
    fn init_with_custom_output() {
        let cli = Cli::parse_from_iter(["dnsup", "init", "-o", "/tmp/custom.toml"]);

        let Some(Command::Init { output }) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(output, std::path::PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn run_mode_is_not_init() {
        let cli = Cli::parse_from_iter(["dnsup", "example.com", "eth0"]);
        assert!(!cli.is_init());
    }
}

mod conversions {
    use super::*;
    use crate::monitor::PublishFailurePolicy;
    use crate::resolve::ReflectionService;

    #[test]
    fn service_arg_maps_to_service() {
        assert_eq!(
            ReflectionService::from(ServiceArg::Akamai),
            ReflectionService::Akamai
        );
        assert_eq!(
            ReflectionService::from(ServiceArg::Cloudflare),
            ReflectionService::Cloudflare
        );
        assert_eq!(
            ReflectionService::from(ServiceArg::Google),
            ReflectionService::Google
        );
        assert_eq!(
            ReflectionService::from(ServiceArg::OpenDns),
            ReflectionService::OpenDns
        );
    }

    #[test]
    fn policy_arg_maps_to_policy() {
        assert_eq!(
            PublishFailurePolicy::from(FailurePolicyArg::Continue),
            PublishFailurePolicy::Continue
        );
        assert_eq!(
            PublishFailurePolicy::from(FailurePolicyArg::Abort),
            PublishFailurePolicy::Abort
        );
    }
}
