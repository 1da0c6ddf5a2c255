//! Resolved upstream target for one inbound request.

use serde::{Deserialize, Serialize};

/// Where a request is forwarded to, and whether unqualified image names get the
/// default namespace spliced in.
///
/// Computed once per request and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UpstreamRoute {
    /// Upstream registry host (may carry a `:port`)
    pub host: String,
    /// Expand single-segment image names with the default namespace
    pub uses_default_namespace: bool,
}

impl UpstreamRoute {
    /// Route to the canonical registry, with namespace expansion.
    pub fn canonical(host: impl Into<String>) -> Self {
        Self { host: host.into(), uses_default_namespace: true }
    }

    /// Route to an upstream whose paths are passed through unmodified.
    pub fn passthrough(host: impl Into<String>) -> Self {
        Self { host: host.into(), uses_default_namespace: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let canonical = UpstreamRoute::canonical("registry-1.docker.io");
        assert!(canonical.uses_default_namespace);

        let ghcr = UpstreamRoute::passthrough("ghcr.io");
        assert_eq!(ghcr.host, "ghcr.io");
        assert!(!ghcr.uses_default_namespace);
    }
}
