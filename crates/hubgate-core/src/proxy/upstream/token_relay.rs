//! `/token` requests go straight to the auth issuer and come back untouched.

use axum::http::header::{self, HeaderMap};
use axum::response::Response;
use hubgate_types::GatewayError;
use url::Url;

use super::client::{apply_connection_policy, host_header_value, inbound_accept, UpstreamClient};
use crate::proxy::common::header_constants::is_hop_by_hop;
use crate::proxy::common::stream_response;
use crate::proxy::context::RequestContext;

/// Issuer URL for an (already colon-repaired) `path?query`.
pub fn token_url(issuer_origin: &str, path_and_query: &str) -> Result<Url, GatewayError> {
    let target = format!("{}{}", issuer_origin, path_and_query);
    Url::parse(&target).map_err(|_| GatewayError::InvalidTarget { target })
}

/// Caller headers minus connection-scoped ones, re-targeted at the issuer.
pub fn build_token_headers(ctx: &RequestContext, url: &Url) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(ctx.headers.len());
    for (name, value) in &ctx.headers {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Ok(host) = host_header_value(url) {
        headers.insert(header::HOST, host);
    }
    apply_connection_policy(&mut headers, inbound_accept(&ctx.headers).as_deref());
    headers
}

/// Relay the request to the issuer and stream its response back verbatim.
pub async fn relay_token(
    client: &UpstreamClient,
    ctx: &RequestContext,
    url: &Url,
) -> Result<Response, GatewayError> {
    tracing::debug!("Relaying token request to {}", url);
    let headers = build_token_headers(ctx, url);
    let response = client.send(&ctx.method, url, headers, ctx.replay_body()).await?;
    Ok(stream_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Method};
    use bytes::Bytes;

    fn context() -> RequestContext {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("hub.example.com"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
        headers.insert("x-custom", HeaderValue::from_static("kept"));
        RequestContext {
            method: Method::GET,
            host: "hub.example.com".to_string(),
            path: "/token".to_string(),
            query: Some("scope=repository%3Abusybox%3Apull".to_string()),
            headers,
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_token_url() {
        let url = token_url(
            "https://auth.docker.io",
            "/token?scope=repository%3Alibrary%2Fbusybox%3Apull&service=registry.docker.io",
        )
        .unwrap();
        assert_eq!(url.host_str(), Some("auth.docker.io"));
        assert_eq!(url.path(), "/token");
        assert_eq!(
            url.query(),
            Some("scope=repository%3Alibrary%2Fbusybox%3Apull&service=registry.docker.io")
        );
    }

    #[test]
    fn test_token_url_invalid_issuer() {
        let err = token_url("not-a-url", "/token").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTarget { .. }));
    }

    #[test]
    fn test_token_headers() {
        let url = Url::parse("https://auth.docker.io/token").unwrap();
        let headers = build_token_headers(&context(), &url);

        assert_eq!(headers[header::HOST], "auth.docker.io");
        assert_eq!(headers[header::AUTHORIZATION], "Basic dXNlcjpwYXNz");
        assert_eq!(headers["x-custom"], "kept");
        assert_eq!(headers[header::CONNECTION], "keep-alive");
        assert_eq!(headers[header::CACHE_CONTROL], "max-age=0");
        assert!(headers.contains_key(header::ACCEPT));
        assert!(!headers.contains_key(header::CONTENT_LENGTH));
    }
}
