//! Domain models for the hubgate gateway.

pub mod config;
mod route;

pub use config::{GatewayConfig, LandingConfig, LengthCheckPolicy, PoolConfig, UpstreamTable};
pub use route::UpstreamRoute;
