//! Redirect following with body replay.
//!
//! The shared client never follows redirects, so every hop here is a brand-new
//! request: same method, same buffered body, same outbound header policy, with
//! `Host` taken from the new target.

use axum::http::header;
use hubgate_types::GatewayError;
use reqwest::Response;
use url::Url;

use super::client::UpstreamClient;
use crate::proxy::context::RequestContext;

/// Terminal response of a redirect chain.
#[derive(Debug)]
pub struct Resolved {
    /// URL that produced `response`
    pub url: Url,
    pub response: Response,
    /// Redirects followed to get here
    pub hops: usize,
}

pub struct RedirectResolver<'a> {
    client: &'a UpstreamClient,
    max_hops: usize,
}

impl<'a> RedirectResolver<'a> {
    pub fn new(client: &'a UpstreamClient, max_hops: usize) -> Self {
        Self { client, max_hops }
    }

    /// Forward `ctx` to `target` and follow `Location` until a response
    /// without one arrives. At most `max_hops + 1` requests are sent.
    pub async fn resolve(&self, ctx: &RequestContext, target: Url) -> Result<Resolved, GatewayError> {
        let mut url = target;
        let mut hops = 0;

        loop {
            let response = self.client.forward(ctx, &url).await?;
            let Some(location) = location_of(&response) else {
                return Ok(Resolved { url, response, hops });
            };

            if hops >= self.max_hops {
                tracing::warn!("Giving up on {} after {} redirects", url, hops);
                return Err(GatewayError::TooManyRedirects { hops });
            }

            let next = next_target(&url, &location)?;
            hops += 1;
            tracing::debug!(hop = hops, status = %response.status(), "Redirect {} -> {}", url, next);
            url = next;
        }
    }
}

/// Non-empty `Location` header, if any.
pub fn location_of(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Resolve `location` against `current`. Only http(s) targets are followed.
pub fn next_target(current: &Url, location: &str) -> Result<Url, GatewayError> {
    let bad_target = || {
        tracing::warn!("Unusable redirect target: {}", location);
        GatewayError::BadRedirectTarget { location: location.to_string() }
    };

    let next = current.join(location).map_err(|_| bad_target())?;
    match next.scheme() {
        "http" | "https" => Ok(next),
        _ => Err(bad_target()),
    }
}
