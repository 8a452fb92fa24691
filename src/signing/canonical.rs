//! Canonical request pieces for AWS Signature V4.

use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// RFC 3986 unreserved characters plus `/`, which paths keep as-is.
const URI_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// RFC 3986 unreserved characters only.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URI-encode a string the way SigV4 expects.
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` is percent-encoded, spaces
/// become `%20`. Slashes are encoded only when `encode_slash` is true.
///
/// ```
/// use postman::signing::uri_encode;
///
/// assert_eq!(uri_encode("/", false), "/");
/// assert_eq!(uri_encode("a+b@example.com", true), "a%2Bb%40example.com");
/// ```
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    if encode_slash {
        utf8_percent_encode(input, QUERY_SET).to_string()
    } else {
        utf8_percent_encode(input, URI_PATH_SET).to_string()
    }
}

/// Normalize a URI path: collapse duplicate slashes, resolve `.` and `..`,
/// and keep a trailing slash.
pub fn normalize_uri_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let has_trailing_slash = path.ends_with('/');

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut result = String::from("/");
    result.push_str(&segments.join("/"));

    if has_trailing_slash && !result.ends_with('/') && result.len() > 1 {
        result.push('/');
    }

    result
}

/// Encode and sort `(name, value)` pairs into `a=1&b=2` form.
///
/// Used both for the canonical query string and for Query API form bodies,
/// which share the same encoding rules.
///
/// ```
/// use postman::signing::canonical_query_string;
///
/// let params = vec![
///     ("Version".to_string(), "2010-12-01".to_string()),
///     ("Action".to_string(), "GetSendQuota".to_string()),
/// ];
/// assert_eq!(
///     canonical_query_string(&params),
///     "Action=GetSendQuota&Version=2010-12-01"
/// );
/// ```
pub fn canonical_query_string(query_params: &[(String, String)]) -> String {
    let mut encoded_params: Vec<(String, String)> = query_params
        .iter()
        .map(|(key, value)| (uri_encode(key, true), uri_encode(value, true)))
        .collect();

    encoded_params.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    encoded_params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block and the signed headers list.
///
/// Names are lowercased and sorted, values trimmed with inner whitespace
/// collapsed. Only headers accepted by [`should_sign_header`] take part.
pub fn canonical_headers(headers: &HeaderMap) -> (String, String) {
    let mut header_map: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (name, value) in headers {
        let name_lower = name.as_str().to_lowercase();

        if !should_sign_header(&name_lower) {
            continue;
        }

        let value_str = value.to_str().unwrap_or("");
        let trimmed = value_str.split_whitespace().collect::<Vec<_>>().join(" ");

        header_map.entry(name_lower).or_default().push(trimmed);
    }

    let canonical = header_map
        .iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect::<String>();

    let signed = header_map
        .keys()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(";");

    (canonical, signed)
}

/// Whether a header takes part in the signature: `host`, `x-amz-*`,
/// `content-type`, `content-md5` and `content-length`.
pub fn should_sign_header(header_name: &str) -> bool {
    let name = header_name.to_lowercase();

    name == "host"
        || name.starts_with("x-amz-")
        || name == "content-type"
        || name == "content-md5"
        || name == "content-length"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_encode_path() {
        assert_eq!(uri_encode("/", false), "/");
        assert_eq!(uri_encode("/a b/c", false), "/a%20b/c");
    }

    #[test]
    fn test_uri_encode_form_values() {
        assert_eq!(uri_encode("user@example.com", true), "user%40example.com");
        assert_eq!(uri_encode("a/b", true), "a%2Fb");
        assert_eq!(uri_encode("x=y&z", true), "x%3Dy%26z");
        assert_eq!(uri_encode("abc+/=", true), "abc%2B%2F%3D");
    }

    #[test]
    fn test_normalize_uri_path() {
        assert_eq!(normalize_uri_path(""), "/");
        assert_eq!(normalize_uri_path("/"), "/");
        assert_eq!(normalize_uri_path("/foo//bar"), "/foo/bar");
        assert_eq!(normalize_uri_path("/foo/./bar/../baz/"), "/foo/baz/");
    }

    #[test]
    fn test_canonical_query_string_empty() {
        assert_eq!(canonical_query_string(&[]), "");
    }

    #[test]
    fn test_canonical_query_string_sorted_and_encoded() {
        let params = vec![
            ("Destinations.member.2".to_string(), "b@example.com".to_string()),
            ("Action".to_string(), "SendRawEmail".to_string()),
            ("Destinations.member.1".to_string(), "a@example.com".to_string()),
        ];

        assert_eq!(
            canonical_query_string(&params),
            "Action=SendRawEmail&Destinations.member.1=a%40example.com&Destinations.member.2=b%40example.com"
        );
    }

    #[test]
    fn test_canonical_headers_filters_and_sorts() {
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-date", "20231215T103045Z".parse().unwrap());
        headers.insert("host", "email.us-east-1.amazonaws.com".parse().unwrap());
        headers.insert("user-agent", "postman/0.1.0".parse().unwrap());
        headers.insert(
            "content-type",
            "application/x-www-form-urlencoded;   charset=utf-8".parse().unwrap(),
        );

        let (canonical, signed) = canonical_headers(&headers);

        assert_eq!(signed, "content-type;host;x-amz-date");
        assert_eq!(
            canonical,
            "content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:email.us-east-1.amazonaws.com\n\
             x-amz-date:20231215T103045Z\n"
        );
    }

    #[test]
    fn test_should_sign_header() {
        assert!(should_sign_header("host"));
        assert!(should_sign_header("X-Amz-Security-Token"));
        assert!(should_sign_header("content-type"));
        assert!(!should_sign_header("user-agent"));
        assert!(!should_sign_header("accept"));
    }
}
