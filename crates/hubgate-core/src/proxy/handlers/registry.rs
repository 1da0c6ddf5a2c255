//! Catch-all handler: every method and path not claimed elsewhere.

use axum::extract::{Request, State};
use axum::response::Response;
use hubgate_types::{GatewayError, UpstreamRoute};
use tracing::Instrument;
use url::Url;

use super::landing::{is_browser_root_request, serve_landing};
use super::search::{is_search_path, normalize_search_query};
use crate::proxy::common::header_constants::X_EXPECTED_CONTENT_LENGTH;
use crate::proxy::common::{error_response, ResponseSanitizer};
use crate::proxy::context::RequestContext;
use crate::proxy::path::{
    join_path_and_query, normalize_path, repair_encoded_colon, split_path_and_query,
};
use crate::proxy::routing::{effective_hostname, resolve_route};
use crate::proxy::server::AppState;
use crate::proxy::upstream::token_relay::token_url;
use crate::proxy::upstream::{relay_token, RedirectResolver};

const TOKEN_PATH_MARKER: &str = "/token";

pub async fn handle_registry_request(State(state): State<AppState>, request: Request) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "registry_request",
        id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        match proxy_request(&state, request).await {
            Ok(response) => response,
            Err(err) => {
                if err.is_client_error() {
                    tracing::debug!(status = err.http_status_code(), "Request rejected: {}", err);
                } else if err.is_upstream_error() {
                    tracing::warn!(status = err.http_status_code(), "Upstream failed: {}", err);
                } else {
                    tracing::warn!(status = err.http_status_code(), "Request failed: {}", err);
                }
                error_response(&err)
            },
        }
    }
    .instrument(span)
    .await
}

async fn proxy_request(state: &AppState, request: Request) -> Result<Response, GatewayError> {
    let config = &state.config;
    let ctx = RequestContext::from_request(request, config.body_limit()).await?;

    if is_browser_root_request(&ctx) {
        return serve_landing(state, &ctx).await;
    }

    let original = ctx.path_and_query();
    let repaired = repair_encoded_colon(&original, &config.default_namespace);
    if repaired != original.as_str() {
        tracing::debug!("Repaired encoded colon: {} -> {}", original, repaired);
    }
    let (path, query) = split_path_and_query(&repaired);

    if path.contains(TOKEN_PATH_MARKER) {
        let url = token_url(config.auth_issuer_origin(), &repaired)?;
        return relay_token(&state.upstream, &ctx, &url).await;
    }

    let ns = ctx.query_param("ns").filter(|ns| !ns.is_empty());
    let (route, query) = if ns.is_none() && is_search_path(path) {
        let route = UpstreamRoute::passthrough(config.upstreams.search_host.as_str());
        (route, normalize_search_query(query))
    } else {
        let hubhost = ctx.query_param("hubhost");
        let hostname = effective_hostname(hubhost.as_deref(), &ctx.host);
        (resolve_route(&config.upstreams, ns.as_deref(), hostname), query.map(str::to_string))
    };
    tracing::debug!(upstream = %route.host, "Routed {}", ctx.host);

    let path = normalize_path(&route, &config.upstreams, path, &config.default_namespace);
    let target = upstream_url(&config.upstreams.scheme, &route.host, &path, query.as_deref())?;

    let resolver = RedirectResolver::new(&state.upstream, config.max_redirects);
    let resolved = resolver.resolve(&ctx, target).await?;
    if resolved.hops > 0 {
        tracing::debug!(hops = resolved.hops, "Resolved redirects to {}", resolved.url);
    }

    let expected_length = if config.length_check.applies_to(&path) {
        ctx.header_str(X_EXPECTED_CONTENT_LENGTH)
    } else {
        None
    };
    let public_origin = ctx.public_origin(&config.public_scheme);
    let sanitizer =
        ResponseSanitizer::new(config.auth_issuer_origin(), public_origin, config.cache_max_age);
    sanitizer.finalize(resolved.response, expected_length)
}

/// Absolute upstream URL for a routed request. `host` must name exactly the
/// parsed authority; anything that spills into path, query or userinfo is
/// rejected.
fn upstream_url(scheme: &str, host: &str, path: &str, query: Option<&str>) -> Result<Url, GatewayError> {
    let target = format!("{}://{}{}", scheme, host, join_path_and_query(path, query));
    match Url::parse(&target) {
        Ok(url) if names_authority(&url, host) => Ok(url),
        _ => Err(GatewayError::InvalidTarget { target }),
    }
}

fn names_authority(url: &Url, host: &str) -> bool {
    let Some(parsed_host) = url.host_str().filter(|h| !h.is_empty()) else {
        return false;
    };
    if !url.username().is_empty() || url.password().is_some() {
        return false;
    }
    let authority = match url.port() {
        Some(port) => format!("{}:{}", parsed_host, port),
        None => parsed_host.to_string(),
    };
    if authority.eq_ignore_ascii_case(host) {
        return true;
    }
    // An explicit default port is dropped by the parser.
    url.port().is_none()
        && url
            .port_or_known_default()
            .is_some_and(|port| format!("{}:{}", parsed_host, port).eq_ignore_ascii_case(host))
}
