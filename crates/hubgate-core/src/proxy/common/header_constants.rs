//! Header names and media types used across the gateway.

use axum::http::HeaderName;

/// Forwarded to S3-backed upstreams only when the client sent it.
pub const X_AMZ_CONTENT_SHA256: HeaderName = HeaderName::from_static("x-amz-content-sha256");
/// Caller-declared body length for the optional length check.
pub const X_EXPECTED_CONTENT_LENGTH: HeaderName =
    HeaderName::from_static("x-expected-content-length");
/// Diagnostic header carried by `bad length` responses.
pub const ERROR_DIAGNOSTIC_NAME: &str = "--error";
pub const ERROR_DIAGNOSTIC: HeaderName = HeaderName::from_static(ERROR_DIAGNOSTIC_NAME);

pub const DOCKER_MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";
pub const OCI_IMAGE_INDEX: &str = "application/vnd.oci.image.index.v1+json";
pub const OCI_IMAGE_MANIFEST: &str = "application/vnd.oci.image.manifest.v1+json";

/// Manifest media types every outbound `Accept` must carry.
pub const REGISTRY_MEDIA_TYPES: [&str; 3] = [DOCKER_MANIFEST_V2, OCI_IMAGE_INDEX, OCI_IMAGE_MANIFEST];

/// Response headers that would restrict how the gateway's responses are embedded.
pub const STRIPPED_RESPONSE_HEADERS: [&str; 3] =
    ["content-security-policy", "content-security-policy-report-only", "clear-site-data"];

/// Connection-scoped headers never copied between hops.
pub const HOP_BY_HOP_HEADERS: [&str; 7] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Whether `name` is connection-scoped.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}
