//! Upstream registry table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Docker Hub registry API host.
pub const CANONICAL_REGISTRY_HOST: &str = "registry-1.docker.io";
/// Public name users type for Docker Hub; aliases to [`CANONICAL_REGISTRY_HOST`].
pub const DOCKER_IO_ALIAS: &str = "docker.io";
/// Docker Hub index host serving `/v1/search` and `/v1/repositories`.
pub const SEARCH_INDEX_HOST: &str = "index.docker.io";

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("gcr", "gcr.io"),
        ("k8s", "registry.k8s.io"),
        ("ghcr", "ghcr.io"),
        ("quay", "quay.io"),
        ("k8s-gcr", "k8s.gcr.io"),
        ("nvcr", "nvcr.io"),
        ("cloudsmith", "docker.cloudsmith.io"),
    ]
    .into_iter()
    .map(|(label, host)| (label.to_string(), host.to_string()))
    .collect()
}

fn validate_scheme(scheme: &str) -> Result<(), ValidationError> {
    match scheme {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::new("scheme_must_be_http_or_https")),
    }
}

/// Known upstream registries and how to reach them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct UpstreamTable {
    /// Scheme used for every upstream URL
    #[validate(custom(function = "validate_scheme"))]
    pub scheme: String,
    /// Registry used for unrecognized host labels
    #[validate(length(min = 1_u64))]
    pub canonical_host: String,
    /// Host serving the legacy search API
    #[validate(length(min = 1_u64))]
    pub search_host: String,
    /// Leading host label → upstream host
    pub aliases: BTreeMap<String, String>,
}

impl Default for UpstreamTable {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            canonical_host: CANONICAL_REGISTRY_HOST.to_string(),
            search_host: SEARCH_INDEX_HOST.to_string(),
            aliases: default_aliases(),
        }
    }
}

impl UpstreamTable {
    /// Upstream host registered for a leading host label, ignoring ASCII case.
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.aliases
            .get(label)
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(label))
                    .map(|(_, host)| host)
            })
            .map(String::as_str)
    }

    /// Whether `host` is the canonical registry.
    pub fn is_canonical(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.canonical_host)
    }
}
