//! Request handling errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while proxying a single inbound request.
///
/// None of these are retried by the gateway and none of them are fatal to the
/// process: each request fails independently with [`GatewayError::http_status_code`].
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum GatewayError {
    /// Inbound request body could not be read to completion
    #[error("Failed to read request body: {message}")]
    BodyReadFailure { message: String },

    /// Transport-level failure talking to an upstream or the auth issuer
    #[error("Upstream {upstream} unreachable: {message}")]
    UpstreamUnreachable { upstream: String, message: String },

    /// Upstream answered with a `Location` that is not a usable URL
    #[error("Invalid redirect target: {location}")]
    BadRedirectTarget { location: String },

    /// Redirect chain exceeded the configured hop limit
    #[error("Too many redirects (stopped after {hops} hops)")]
    TooManyRedirects { hops: usize },

    /// Declared and actual content-length disagree
    #[error("bad len: {actual}, expect: {expected}")]
    LengthMismatch { expected: String, actual: String },

    /// Routing produced a target that does not form a valid URL
    #[error("Invalid upstream target: {target}")]
    InvalidTarget { target: String },

    /// Request rejected by the user-agent block list
    #[error("User agent blocked: {user_agent}")]
    BlockedUserAgent { user_agent: String },
}

impl GatewayError {
    /// Check if this error was caused by the caller (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::InvalidTarget { .. } | Self::BlockedUserAgent { .. }
        )
    }

    /// Check if this error originates from an upstream misbehaving or being down.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnreachable { .. }
                | Self::BadRedirectTarget { .. }
                | Self::TooManyRedirects { .. }
        )
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::BodyReadFailure { .. } => 500,
            Self::UpstreamUnreachable { .. }
            | Self::BadRedirectTarget { .. }
            | Self::TooManyRedirects { .. } => 502,
            Self::LengthMismatch { .. } | Self::InvalidTarget { .. } => 400,
            Self::BlockedUserAgent { .. } => 403,
        }
    }
}
