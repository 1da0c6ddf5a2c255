//! # hubgate Types
//!
//! Configuration models, routing types and error definitions for the hubgate
//! registry gateway.
//!
//! - **`error`** - Typed errors for request handling and configuration
//! - **`models`** - Gateway configuration and upstream routes
//!
//! ## Architecture Role
//!
//! `hubgate-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!    hubgate-types (this crate)
//!            │
//!            ▼
//!      hubgate-core
//!            │
//!            ▼
//!     hubgate-server
//! ```
//!
//! Everything here is plain data: serde-serializable and `Clone`.

pub mod error;
pub mod models;

pub use error::{ConfigError, GatewayError};

pub use models::{
    GatewayConfig, LandingConfig, LengthCheckPolicy, PoolConfig, UpstreamRoute, UpstreamTable,
};
