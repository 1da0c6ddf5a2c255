//! Upstream selection.
//!
//! Routing is a pure function of the `ns` override, the effective hostname and
//! the configured upstream table: no I/O, no hidden state.

use hubgate_types::models::config::DOCKER_IO_ALIAS;
use hubgate_types::{UpstreamRoute, UpstreamTable};

/// Hostname used for label derivation: a non-empty `hubhost` query parameter
/// wins over the request's own `Host`.
pub fn effective_hostname<'a>(hubhost: Option<&'a str>, host: &'a str) -> &'a str {
    match hubhost {
        Some(h) if !h.is_empty() => h,
        _ => host,
    }
}

/// Leading dot-delimited label of a hostname, without any `:port` suffix.
pub fn leading_label(hostname: &str) -> &str {
    let label = hostname.split('.').next().unwrap_or(hostname);
    label.split(':').next().unwrap_or(label)
}

/// Resolve the upstream for a request.
///
/// A non-empty `ns` override is taken literally as the upstream host
/// (`docker.io` maps to the canonical registry) and disables namespace
/// insertion. Otherwise the hostname's leading label is looked up in the alias
/// table, falling back to the canonical registry.
pub fn resolve_route(table: &UpstreamTable, ns: Option<&str>, hostname: &str) -> UpstreamRoute {
    if let Some(ns) = ns.filter(|ns| !ns.is_empty()) {
        let host = if ns.eq_ignore_ascii_case(DOCKER_IO_ALIAS) {
            table.canonical_host.as_str()
        } else {
            ns
        };
        return UpstreamRoute::passthrough(host);
    }

    match table.lookup(leading_label(hostname)) {
        Some(host) => UpstreamRoute::passthrough(host),
        None => UpstreamRoute::canonical(table.canonical_host.as_str()),
    }
}
