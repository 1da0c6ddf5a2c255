//! Path and query fixups applied before forwarding.
//!
//! Both fixups are pure string rewrites and idempotent.

use hubgate_types::{UpstreamRoute, UpstreamTable};
use std::borrow::Cow;

const V2_PREFIX: &str = "/v2/";
const ENCODED_COLON: &str = "%3A";
const ENCODED_SLASH: &str = "%2F";

/// Split `path?query` into its parts.
pub fn split_path_and_query(path_and_query: &str) -> (&str, Option<&str>) {
    match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    }
}

/// Join a path and an optional raw query back together.
pub fn join_path_and_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}

/// `/v2/{a}/{b}/{c}` with exactly three non-empty segments → `[a, b, c]`.
fn image_path_segments(path: &str) -> Option<[&str; 3]> {
    let rest = path.strip_prefix(V2_PREFIX)?;
    let mut parts = rest.split('/');
    let segments = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Splice `namespace` after `/v2/` for single-segment image names.
///
/// Only `/v2/{name}/{kind}/{reference}` paths whose first segment is not
/// already `namespace` are rewritten; everything else is returned as is.
pub fn insert_default_namespace<'a>(path: &'a str, namespace: &str) -> Cow<'a, str> {
    match image_path_segments(path) {
        Some([first, ..]) if first != namespace => {
            Cow::Owned(format!("{}{}/{}", V2_PREFIX, namespace, &path[V2_PREFIX.len()..]))
        },
        _ => Cow::Borrowed(path),
    }
}

/// Apply namespace insertion when the route asks for it and targets the
/// canonical registry.
pub fn normalize_path<'a>(
    route: &UpstreamRoute,
    table: &UpstreamTable,
    path: &'a str,
    namespace: &str,
) -> Cow<'a, str> {
    if route.uses_default_namespace && table.is_canonical(&route.host) {
        insert_default_namespace(path, namespace)
    } else {
        Cow::Borrowed(path)
    }
}

/// Insert an encoded `namespace/` after the first encoded colon.
///
/// Token scopes such as `repository%3Abusybox%3Apull` omit the implicit
/// namespace. Triggered only when the query holds no encoded slash, which the
/// rewrite itself adds, so a second pass is a no-op.
pub fn repair_encoded_colon<'a>(path_and_query: &'a str, namespace: &str) -> Cow<'a, str> {
    let (_, query) = split_path_and_query(path_and_query);
    let query_has_slash = query.is_some_and(|q| q.contains(ENCODED_SLASH));
    if query_has_slash || !path_and_query.contains(ENCODED_COLON) {
        return Cow::Borrowed(path_and_query);
    }
    let replacement = format!("{}{}{}", ENCODED_COLON, namespace, ENCODED_SLASH);
    Cow::Owned(path_and_query.replacen(ENCODED_COLON, &replacement, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_library_for_unqualified_image() {
        assert_eq!(
            insert_default_namespace("/v2/foo/manifests/latest", "library"),
            "/v2/library/foo/manifests/latest"
        );
        assert_eq!(
            insert_default_namespace("/v2/alpine/tags/list", "library"),
            "/v2/library/alpine/tags/list"
        );
    }

    #[test]
    fn test_qualified_paths_unchanged() {
        for path in [
            "/v2/library/foo/manifests/latest",
            "/v2/bitnami/redis/manifests/7.2",
            "/v2/",
            "/v2/foo/blobs/uploads/",
            "/v2//manifests/latest",
            "/token",
            "/v1/search",
        ] {
            assert_eq!(insert_default_namespace(path, "library"), path, "path {}", path);
        }
    }

    #[test]
    fn test_first_segment_already_namespace() {
        assert_eq!(
            insert_default_namespace("/v2/library/manifests/latest", "library"),
            "/v2/library/manifests/latest"
        );
    }

    #[test]
    fn test_insertion_is_idempotent() {
        for path in ["/v2/foo/manifests/latest", "/v2/library/foo/manifests/latest", "/v2/"] {
            let once = insert_default_namespace(path, "library").into_owned();
            let twice = insert_default_namespace(&once, "library").into_owned();
            assert_eq!(once, twice, "path {}", path);
        }
    }

    #[test]
    fn test_custom_namespace() {
        assert_eq!(
            insert_default_namespace("/v2/foo/manifests/latest", "mirror"),
            "/v2/mirror/foo/manifests/latest"
        );
    }

    #[test]
    fn test_normalize_only_for_canonical_route() {
        let table = UpstreamTable::default();
        let canonical = UpstreamRoute::canonical("registry-1.docker.io");
        let ghcr = UpstreamRoute::passthrough("ghcr.io");
        let forced_hub = UpstreamRoute::passthrough("registry-1.docker.io");

        let path = "/v2/foo/manifests/latest";
        assert_eq!(
            normalize_path(&canonical, &table, path, "library"),
            "/v2/library/foo/manifests/latest"
        );
        assert_eq!(normalize_path(&ghcr, &table, path, "library"), path);
        assert_eq!(normalize_path(&forced_hub, &table, path, "library"), path);
    }

    #[test]
    fn test_colon_repair() {
        let input = "/token?scope=repository%3Abusybox%3Apull&service=registry.docker.io";
        let repaired = repair_encoded_colon(input, "library");
        assert_eq!(
            repaired,
            "/token?scope=repository%3Alibrary%2Fbusybox%3Apull&service=registry.docker.io"
        );
        assert_eq!(repaired.matches("%3Alibrary%2F").count(), 1);
    }

    #[test]
    fn test_colon_repair_tag_reference() {
        assert_eq!(repair_encoded_colon("/x?ref=img%3Atag", "library"), "/x?ref=img%3Alibrary%2Ftag");
    }

    #[test]
    fn test_colon_repair_is_idempotent() {
        let once = repair_encoded_colon("/token?scope=repository%3Abusybox%3Apull", "library")
            .into_owned();
        let twice = repair_encoded_colon(&once, "library");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_colon_repair_skips_qualified_scope() {
        let input = "/token?scope=repository%3Abitnami%2Fredis%3Apull";
        assert_eq!(repair_encoded_colon(input, "library"), input);
    }

    #[test]
    fn test_colon_repair_without_colon() {
        assert_eq!(repair_encoded_colon("/v2/foo/manifests/latest", "library"), "/v2/foo/manifests/latest");
    }

    #[test]
    fn test_split_and_join() {
        assert_eq!(split_path_and_query("/token?a=b"), ("/token", Some("a=b")));
        assert_eq!(split_path_and_query("/v2/"), ("/v2/", None));
        assert_eq!(join_path_and_query("/token", Some("a=b")), "/token?a=b");
        assert_eq!(join_path_and_query("/token", Some("")), "/token");
        assert_eq!(join_path_and_query("/v2/", None), "/v2/");
    }
}
