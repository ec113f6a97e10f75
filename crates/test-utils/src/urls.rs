//! Helpers for inspecting generated WMS request URLs.

/// Split a URL into its base (everything before `?`) and raw query.
pub fn split_url(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

/// Decode the query string of a URL into ordered key/value pairs.
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    let (_, query) = split_url(url);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Look up a single decoded query parameter by exact key.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    query_pairs(url)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Raw (still percent-encoded) `key=value` segments of the query string.
pub fn raw_query_segments(url: &str) -> Vec<String> {
    let (_, query) = split_url(url);
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
