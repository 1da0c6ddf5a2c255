mod request_executor;

#[cfg(test)]
mod tests;

use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use hubgate_types::{GatewayError, PoolConfig};
use reqwest::{Client, Response};
use url::Url;

use crate::proxy::common::client_builder::build_http_client;
use crate::proxy::context::RequestContext;

pub use request_executor::{build_forward_headers, host_header_value, normalize_accept};
pub(crate) use request_executor::{apply_connection_policy, inbound_accept};

/// Shared outbound client. One instance serves every request; the underlying
/// `reqwest::Client` owns the connection pool.
pub struct UpstreamClient {
    http_client: Client,
}

impl UpstreamClient {
    /// Wrap a pre-built client.
    ///
    /// The client must not follow redirects on its own, see
    /// [`build_http_client`].
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }

    pub fn from_pool_config(pool: &PoolConfig) -> Result<Self, String> {
        build_http_client(pool).map(Self::new)
    }

    /// Send one attempt of `ctx` to `url` with the registry header policy.
    pub async fn forward(&self, ctx: &RequestContext, url: &Url) -> Result<Response, GatewayError> {
        let headers = build_forward_headers(ctx, url);
        self.send(&ctx.method, url, headers, ctx.replay_body()).await
    }

    /// Plain `GET`, used for relayed landing pages.
    pub async fn fetch(&self, url: &Url) -> Result<Response, GatewayError> {
        let mut headers = HeaderMap::new();
        if let Ok(host) = host_header_value(url) {
            headers.insert(axum::http::header::HOST, host);
        }
        self.send(&Method::GET, url, headers, None).await
    }

    /// Send a fully prepared request.
    pub async fn send(
        &self,
        method: &Method,
        url: &Url,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Result<Response, GatewayError> {
        request_executor::execute(&self.http_client, method, url, headers, body).await
    }
}
