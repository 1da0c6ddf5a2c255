//! Gateway configuration models.

mod enums;
mod gateway;
mod upstream;

pub use enums::LengthCheckPolicy;
pub use gateway::{
    GatewayConfig, LandingConfig, PoolConfig, DEFAULT_AUTH_ISSUER, DEFAULT_NAMESPACE, DEFAULT_PORT,
};
pub use upstream::{UpstreamTable, CANONICAL_REGISTRY_HOST, DOCKER_IO_ALIAS, SEARCH_INDEX_HOST};
