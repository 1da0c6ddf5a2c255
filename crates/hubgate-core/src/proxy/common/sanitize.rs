//! Terminal response handling: auth challenge rewriting, header cleanup,
//! CORS/cache injection, optional length check and body streaming.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use futures::TryStreamExt;
use hubgate_types::GatewayError;

use super::header_constants::{is_hop_by_hop, STRIPPED_RESPONSE_HEADERS};

/// Rewrites upstream responses so clients keep talking to the gateway.
#[derive(Debug, Clone)]
pub struct ResponseSanitizer<'a> {
    issuer_origin: &'a str,
    public_origin: String,
    cache_max_age: u64,
}

impl<'a> ResponseSanitizer<'a> {
    pub fn new(issuer_origin: &'a str, public_origin: String, cache_max_age: u64) -> Self {
        Self { issuer_origin, public_origin, cache_max_age }
    }

    /// Point every `Www-Authenticate` realm at the gateway instead of the issuer.
    pub fn rewrite_auth_challenge(&self, headers: &mut HeaderMap) {
        if self.issuer_origin.is_empty() || !headers.contains_key(header::WWW_AUTHENTICATE) {
            return;
        }

        let rewritten: Vec<HeaderValue> = headers
            .get_all(header::WWW_AUTHENTICATE)
            .iter()
            .map(|value| match value.to_str() {
                Ok(text) if text.contains(self.issuer_origin) => {
                    let replaced = text.replace(self.issuer_origin, &self.public_origin);
                    HeaderValue::from_str(&replaced).unwrap_or_else(|_| value.clone())
                },
                _ => value.clone(),
            })
            .collect();

        headers.remove(header::WWW_AUTHENTICATE);
        for value in rewritten {
            headers.append(header::WWW_AUTHENTICATE, value);
        }
    }

    /// Apply the full header policy for a terminal response.
    pub fn sanitize_headers(&self, headers: &mut HeaderMap) {
        self.rewrite_auth_challenge(headers);

        for name in STRIPPED_RESPONSE_HEADERS {
            headers.remove(name);
        }

        headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("*"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", self.cache_max_age)) {
            headers.insert(header::CACHE_CONTROL, value);
        }
    }

    /// Turn the terminal upstream response into the caller's response.
    ///
    /// With `expected_length` set, a differing `Content-Length` aborts before
    /// any body byte is forwarded.
    pub fn finalize(
        &self,
        upstream: reqwest::Response,
        expected_length: Option<&str>,
    ) -> Result<Response, GatewayError> {
        if let Some(expected) = expected_length {
            check_length(expected, upstream.headers())?;
        }

        let mut response = stream_response(upstream);
        self.sanitize_headers(response.headers_mut());
        Ok(response)
    }
}

/// Compare a declared length with the response's `Content-Length`.
pub fn check_length(expected: &str, headers: &HeaderMap) -> Result<(), GatewayError> {
    let expected = expected.trim();
    let actual = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim();

    if expected == actual {
        Ok(())
    } else {
        Err(GatewayError::LengthMismatch { expected: expected.to_string(), actual: actual.to_string() })
    }
}

/// Copy status and end-to-end headers, and stream the body through unchanged.
pub fn stream_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers());
    let stream = upstream
        .bytes_stream()
        .inspect_err(|e| tracing::warn!("Upstream body stream aborted: {}", e));

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

fn end_to_end_headers(source: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        if !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}
