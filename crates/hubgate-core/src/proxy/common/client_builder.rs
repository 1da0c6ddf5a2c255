use hubgate_types::PoolConfig;
use std::time::Duration;

/// Build the shared upstream HTTP client.
///
/// Redirects are never followed by the client itself: `Location` handling
/// belongs to the redirect resolver so the buffered body can be replayed and
/// each hop gets the gateway's header policy. No overall timeout is set; the
/// idle timeout only bounds how long pooled connections live.
pub fn build_http_client(pool: &PoolConfig) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(pool.max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(pool.idle_timeout_secs))
        .tcp_nodelay(true)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
