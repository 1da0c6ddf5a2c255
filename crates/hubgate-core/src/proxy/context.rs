//! Replayable snapshot of an inbound request.

use axum::extract::Request;
use axum::http::{header, HeaderMap, Method};
use bytes::Bytes;
use hubgate_types::GatewayError;

/// Everything needed to replay an inbound request against any number of
/// upstream URLs.
///
/// The body is read to completion up front: a redirect chain re-sends it on
/// every hop, so the original stream cannot be used.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Public host the request arrived on
    pub host: String,
    /// Raw (still percent-encoded) path
    pub path: String,
    /// Raw query string, without `?`
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RequestContext {
    /// Buffer `request`, failing with [`GatewayError::BodyReadFailure`] when the
    /// body cannot be read or exceeds `max_body_bytes`.
    pub async fn from_request(request: Request, max_body_bytes: usize) -> Result<Self, GatewayError> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, max_body_bytes)
            .await
            .map_err(|e| GatewayError::BodyReadFailure { message: e.to_string() })?;

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.as_str().to_string()))
            .unwrap_or_default();

        Ok(Self {
            method: parts.method,
            host,
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body,
        })
    }

    /// `path?query` exactly as received.
    pub fn path_and_query(&self) -> String {
        crate::proxy::path::join_path_and_query(&self.path, self.query.as_deref())
    }

    /// Origin the caller used, e.g. `https://hub.example.com`.
    pub fn public_origin(&self, scheme: &str) -> String {
        format!("{}://{}", scheme, self.host)
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Header value as text, if present and valid.
    pub fn header_str(&self, name: impl header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body to send upstream; empty bodies carry no entity.
    pub fn replay_body(&self) -> Option<Bytes> {
        if self.body.is_empty() {
            None
        } else {
            Some(self.body.clone())
        }
    }
}
