use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use axum::http::Method;
use bytes::Bytes;
use hubgate_types::GatewayError;
use reqwest::{Client, Response};
use url::Url;

use crate::proxy::common::header_constants::{
    OCI_IMAGE_INDEX, REGISTRY_MEDIA_TYPES, X_AMZ_CONTENT_SHA256,
};
use crate::proxy::context::RequestContext;

/// Copied from the caller when present.
const PASSTHROUGH_HEADERS: [HeaderName; 3] =
    [header::USER_AGENT, header::ACCEPT_LANGUAGE, header::ACCEPT_ENCODING];

/// Forwarded only when the caller sent them.
const CREDENTIAL_HEADERS: [HeaderName; 3] =
    [header::AUTHORIZATION, X_AMZ_CONTENT_SHA256, header::CONTENT_TYPE];

/// `Host` value for `url`: host plus any non-default port.
pub fn host_header_value(url: &Url) -> Result<HeaderValue, InvalidHeaderValue> {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => HeaderValue::from_str(&format!("{}:{}", host, port)),
        None => HeaderValue::from_str(host),
    }
}

/// Make sure `Accept` advertises every registry manifest media type.
///
/// An absent or blank value gets the full list. A value already naming the
/// OCI index type is left alone; otherwise the missing types are appended.
pub fn normalize_accept(accept: Option<&str>) -> String {
    let accept = accept.map(str::trim).unwrap_or_default();
    if accept.is_empty() {
        return REGISTRY_MEDIA_TYPES.join(", ");
    }
    if accept.contains(OCI_IMAGE_INDEX) {
        return accept.to_string();
    }

    let mut normalized = accept.to_string();
    for media_type in REGISTRY_MEDIA_TYPES {
        if !accept.contains(media_type) {
            normalized.push_str(", ");
            normalized.push_str(media_type);
        }
    }
    normalized
}

/// All inbound `Accept` values folded into one list.
pub(crate) fn inbound_accept(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> =
        headers.get_all(header::ACCEPT).iter().filter_map(|v| v.to_str().ok()).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

/// Outbound headers for one registry hop to `url`.
pub fn build_forward_headers(ctx: &RequestContext, url: &Url) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(host) = host_header_value(url) {
        headers.insert(header::HOST, host);
    }

    for name in PASSTHROUGH_HEADERS.iter().chain(CREDENTIAL_HEADERS.iter()) {
        if let Some(value) = ctx.headers.get(name) {
            headers.insert(name.clone(), value.clone());
        }
    }

    apply_connection_policy(&mut headers, inbound_accept(&ctx.headers).as_deref());
    headers
}

/// `Accept`, `Connection` and `Cache-Control` every outbound request carries.
pub(crate) fn apply_connection_policy(headers: &mut HeaderMap, accept: Option<&str>) {
    if let Ok(value) = HeaderValue::from_str(&normalize_accept(accept)) {
        headers.insert(header::ACCEPT, value);
    }
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
}

pub(super) async fn execute(
    client: &Client,
    method: &Method,
    url: &Url,
    headers: HeaderMap,
    body: Option<Bytes>,
) -> Result<Response, GatewayError> {
    let mut request = client.request(method.clone(), url.clone()).headers(headers);
    if let Some(body) = body {
        request = request.body(body);
    }

    request.send().await.map_err(|e| {
        let upstream = url.host_str().unwrap_or_default().to_string();
        tracing::warn!("Upstream {} unreachable: {}", upstream, e);
        GatewayError::UpstreamUnreachable { upstream, message: e.to_string() }
    })
}
