//! Top-level gateway configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::LengthCheckPolicy;
use super::upstream::UpstreamTable;
use crate::error::ConfigError;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 50001;
/// Token issuer registry clients are normally sent to.
pub const DEFAULT_AUTH_ISSUER: &str = "https://auth.docker.io";
/// Namespace of official images on the canonical registry.
pub const DEFAULT_NAMESPACE: &str = "library";

const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Zero leaves inbound bodies uncapped.
const DEFAULT_MAX_BODY_BYTES: usize = 0;
const DEFAULT_CACHE_MAX_AGE: u64 = 1500;

/// Shared outbound connection pool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle connections kept per upstream host
    pub max_idle_per_host: usize,
    /// Seconds an idle pooled connection is kept
    #[validate(range(min = 1_u64))]
    pub idle_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_idle_per_host: 100, idle_timeout_secs: 90 }
    }
}

/// What browsers hitting `/` get instead of a proxied response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct LandingConfig {
    /// Answer with a 302 to this URL
    #[validate(url)]
    pub redirect_url: Option<String>,
    /// Fetch this URL and relay it
    #[validate(url)]
    pub proxy_url: Option<String>,
}

/// Full gateway configuration. Loaded once at startup, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct GatewayConfig {
    /// Port to listen on
    #[validate(range(min = 1_u16))]
    pub port: u16,
    /// Address to bind
    #[validate(length(min = 1_u64))]
    pub bind_address: String,
    /// Upstream registries
    #[validate(nested)]
    pub upstreams: UpstreamTable,
    /// External token issuer `/token` requests are relayed to
    #[validate(url)]
    pub auth_issuer: String,
    /// Namespace spliced into unqualified canonical-registry paths
    #[validate(length(min = 1_u64))]
    pub default_namespace: String,
    /// Scheme of the public origin advertised in auth challenges
    #[validate(length(min = 1_u64))]
    pub public_scheme: String,
    /// Redirect hops followed before giving up
    #[validate(range(min = 1_usize))]
    pub max_redirects: usize,
    /// Largest inbound body buffered for replay, 0 for no cap
    pub max_body_bytes: usize,
    /// Outbound pool
    #[validate(nested)]
    pub pool: PoolConfig,
    /// Content-length sanity check policy
    pub length_check: LengthCheckPolicy,
    /// `max-age` set on sanitized responses
    pub cache_max_age: u64,
    /// Browser landing page
    #[validate(nested)]
    pub landing: LandingConfig,
    /// Case-insensitive user-agent substrings that are refused
    pub blocked_user_agents: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            upstreams: UpstreamTable::default(),
            auth_issuer: DEFAULT_AUTH_ISSUER.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            public_scheme: "https".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            pool: PoolConfig::default(),
            length_check: LengthCheckPolicy::default(),
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            landing: LandingConfig::default(),
            blocked_user_agents: vec!["netcraft".to_string()],
        }
    }
}

impl GatewayConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::from_json_error(&e))
    }

    /// Validate all fields, reporting the first offending field.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| {
            let field = e
                .errors()
                .keys()
                .next()
                .map_or_else(|| "config".to_string(), |k| k.to_string());
            ConfigError::ValidationError { field, message: e.to_string() }
        })
    }

    /// Get the full bind socket address.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Byte limit applied when buffering an inbound body.
    pub fn body_limit(&self) -> usize {
        match self.max_body_bytes {
            0 => usize::MAX,
            limit => limit,
        }
    }

    /// Auth issuer origin as it appears inside `Www-Authenticate` realms.
    pub fn auth_issuer_origin(&self) -> &str {
        self.auth_issuer.trim_end_matches('/')
    }
}
