use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use hubgate_types::GatewayError;
use std::sync::Arc;

use crate::proxy::common::error_response;

/// Case-insensitive user-agent substrings that are refused.
///
/// Built once from configuration and shared read-only by all requests.
#[derive(Debug, Clone, Default)]
pub struct UserAgentBlocklist {
    needles: Vec<String>,
}

impl UserAgentBlocklist {
    pub fn new(entries: &[String]) -> Self {
        let needles = entries
            .iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { needles }
    }

    pub fn is_blocked(&self, user_agent: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let user_agent = user_agent.to_lowercase();
        self.needles.iter().any(|needle| user_agent.contains(needle.as_str()))
    }

    pub fn len(&self) -> usize {
        self.needles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

pub async fn user_agent_filter(
    State(blocklist): State<Arc<UserAgentBlocklist>>,
    request: Request,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if blocklist.is_blocked(user_agent) {
        tracing::warn!("Blocked user agent: {}", user_agent);
        let err = GatewayError::BlockedUserAgent { user_agent: user_agent.to_string() };
        return error_response(&err);
    }

    next.run(request).await
}
