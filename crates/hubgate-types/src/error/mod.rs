//! Typed error definitions for hubgate.
//!
//! Errors are split by domain:
//!
//! - [`GatewayError`] covers everything that can fail while serving a single
//!   inbound request. Each variant maps to the HTTP status returned to the caller.
//! - [`ConfigError`] covers loading and validating the startup configuration.

mod config;
mod gateway;

pub use config::ConfigError;
pub use gateway::GatewayError;
