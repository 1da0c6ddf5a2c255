//! Gateway router and the state it shares across requests.

use axum::{middleware, Router};
use hubgate_types::GatewayConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::proxy::handlers::handle_registry_request;
use crate::proxy::middleware::{user_agent_filter, UserAgentBlocklist};
use crate::proxy::upstream::UpstreamClient;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: Arc<UpstreamClient>,
    pub blocklist: Arc<UserAgentBlocklist>,
}

impl AppState {
    /// Build the shared client and blocklist from a loaded configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, String> {
        let upstream = UpstreamClient::from_pool_config(&config.pool)?;
        let blocklist = UserAgentBlocklist::new(&config.blocked_user_agents);
        if !blocklist.is_empty() {
            tracing::info!("User-agent blocklist active ({} entries)", blocklist.len());
        }

        Ok(Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
            blocklist: Arc::new(blocklist),
        })
    }
}

/// Router that proxies every method and path.
pub fn build_gateway_router(state: AppState) -> Router {
    Router::new()
        .fallback(handle_registry_request)
        .layer(middleware::from_fn_with_state(state.blocklist.clone(), user_agent_filter))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
