//! What a browser sees when it opens the gateway root.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use hubgate_types::GatewayError;
use url::Url;

use crate::proxy::common::stream_response;
use crate::proxy::context::RequestContext;
use crate::proxy::server::AppState;

const LANDING_TEMPLATE: &str = include_str!("../../../assets/landing.html");
const HOST_PLACEHOLDER: &str = "{{HOST}}";

/// `GET /` from something that identifies as a browser.
pub fn is_browser_root_request(ctx: &RequestContext) -> bool {
    ctx.method == Method::GET
        && ctx.path == "/"
        && ctx
            .header_str(header::USER_AGENT)
            .is_some_and(|ua| ua.to_ascii_lowercase().contains("mozilla"))
}

/// Keep only characters that can appear in a host name or port.
fn display_host(host: &str) -> String {
    host.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
        .collect()
}

pub fn render_landing_page(host: &str) -> String {
    LANDING_TEMPLATE.replace(HOST_PLACEHOLDER, &display_host(host))
}

/// Redirect, relay or render the landing page, in that order of preference.
pub async fn serve_landing(state: &AppState, ctx: &RequestContext) -> Result<Response, GatewayError> {
    let landing = &state.config.landing;

    if let Some(target) = landing.redirect_url.as_deref() {
        let location = HeaderValue::from_str(target)
            .map_err(|_| GatewayError::InvalidTarget { target: target.to_string() })?;
        return Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response());
    }

    if let Some(target) = landing.proxy_url.as_deref() {
        let url = Url::parse(target)
            .map_err(|_| GatewayError::InvalidTarget { target: target.to_string() })?;
        let response = state.upstream.fetch(&url).await?;
        return Ok(stream_response(response));
    }

    Ok(Html(render_landing_page(&ctx.host)).into_response())
}
