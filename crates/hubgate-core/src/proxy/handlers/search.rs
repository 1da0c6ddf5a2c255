//! Docker Hub v1 search API, served by the index host rather than the registry.

use std::borrow::Cow;

const SEARCH_PREFIXES: [&str; 2] = ["/v1/search", "/v1/repositories"];
const LIBRARY_PREFIX: &str = "library/";

pub fn is_search_path(path: &str) -> bool {
    SEARCH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// `library/nginx` → `nginx`. A bare `library/` is kept so it still matches
/// the namespace itself.
pub fn normalize_search_term(term: &str) -> Cow<'_, str> {
    match term.strip_prefix(LIBRARY_PREFIX) {
        Some(rest) if !rest.is_empty() => Cow::Owned(rest.to_string()),
        _ => Cow::Borrowed(term),
    }
}

/// Rewrite the `q` parameter of a raw query. The query is re-encoded only
/// when the term actually changed.
pub fn normalize_search_query(query: Option<&str>) -> Option<String> {
    let raw = query?;
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut changed = false;
    let rewritten: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(key, value)| {
            if key == "q" {
                if let Cow::Owned(term) = normalize_search_term(&value) {
                    changed = true;
                    return (key, term);
                }
            }
            (key, value)
        })
        .collect();

    if !changed {
        return Some(raw.to_string());
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &rewritten {
        serializer.append_pair(key, value);
    }
    Some(serializer.finish())
}
