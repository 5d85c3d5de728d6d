//! Error types for task specification parsing.

use thiserror::Error;

/// Error type for rejected task specifications.
///
/// Any of these aborts startup before a single task is polled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskSpecError {
    /// Wrong number of `:`-separated fields.
    #[error("invalid specification '{spec}': expected <interface>[:<label>[:<strategy>[:<interval>]]]")]
    InvalidSpecification {
        /// The rejected specification
        spec: String,
    },

    /// Unrecognized strategy token.
    #[error(
        "invalid strategy '{token}': expected one of assign, assigned, inet, inet4, inet6, resolve, resolv, resolv4, resolv6"
    )]
    InvalidStrategy {
        /// The rejected token
        token: String,
    },

    /// Malformed duration string.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// The rejected duration string
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },

    /// A required field was empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the empty field
        field: &'static str,
    },

    /// The poll interval was zero.
    #[error("poll interval must be greater than 0")]
    ZeroInterval,
}
