//! Publishing layer for writing address records to a DNS provider.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`]) and reading responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`]) with a `reqwest` implementation ([`ReqwestClient`])
//! - Record types ([`RecordType`])
//! - Publishing with retries ([`Publisher`], [`GandiPublisher`], [`RetryPolicy`])

mod client;
mod error;
mod publisher;
mod record;
mod retry;
mod transport;

#[cfg(test)]
mod publisher_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, PublishError, RetryableError};
pub use publisher::{DEFAULT_TTL, GandiPublisher, IsRetryable, PublishOutcome, Publisher};
pub use record::RecordType;
pub use retry::RetryPolicy;
pub use transport::{HttpClient, HttpRequest, HttpResponse};
