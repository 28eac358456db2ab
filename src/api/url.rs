//
//  seafile-cli
//  api/url.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # URL Building
//!
//! Helpers for turning a server base URL plus path segments into the absolute
//! URLs the Seafile Web API expects.
//!
//! Seafile endpoints are slash-terminated (`/api2/repos/`, `/api2/auth-token/`),
//! so [`urljoin`] always emits a trailing slash unless the result carries a
//! query string.
//!
//! ```rust
//! use seafile_cli::api::url::{querystr, urljoin};
//!
//! assert_eq!(urljoin("http://x.com", &["api2", "repos"]), "http://x.com/api2/repos/");
//!
//! let url = format!("{}{}", urljoin("http://x.com", &["api2/repos/abc/dir"]), querystr([("p", "/")]));
//! assert_eq!(url, "http://x.com/api2/repos/abc/dir/?p=%2F");
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

/// Bytes escaped by [`path_segment`]: the URL path set plus both slashes and `%`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Joins a base URL with path segments.
///
/// Every segment has its leading and trailing slashes stripped and is followed
/// by exactly one slash. Segments that are empty after stripping are skipped.
///
/// # Query Strings
///
/// When the joined result contains a `?`, the trailing slash is dropped and a
/// slash directly before the `?` is removed, so
/// `urljoin("http://x.com", &["search", "?q=a"])` yields
/// `http://x.com/search?q=a`.
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::url::urljoin;
///
/// assert_eq!(urljoin("http://x.com/", &[]), "http://x.com/");
/// assert_eq!(urljoin("http://x.com", &["/api2/", "/repos/"]), "http://x.com/api2/repos/");
/// ```
pub fn urljoin(base: &str, segments: &[&str]) -> String {
    let mut url = base.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }

    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push_str(segment);
        url.push('/');
    }

    if url.contains('?') {
        url.pop();
        url = url.replacen("/?", "?", 1);
    }

    url
}

/// Renders key/value pairs as a percent-encoded query string prefixed with `?`.
///
/// Pairs are emitted in the order given, so the output is deterministic.
/// Encoding follows `application/x-www-form-urlencoded` (spaces become `+`,
/// slashes become `%2F`).
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::url::querystr;
///
/// assert_eq!(querystr([("p", "/My Docs")]), "?p=%2FMy+Docs");
/// assert_eq!(querystr([("a", "1"), ("b", "2")]), "?a=1&b=2");
/// ```
pub fn querystr<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::from("?"));
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Percent-encodes a value so it stays exactly one path segment.
///
/// ```rust
/// use seafile_cli::api::url::{path_segment, urljoin};
///
/// assert_eq!(path_segment("a?b/c"), "a%3Fb%2Fc");
/// assert_eq!(urljoin("http://x.com", &["api2/repos", &path_segment("a?b")]), "http://x.com/api2/repos/a%3Fb/");
/// ```
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Normalizes a server URL for storage and joining.
///
/// Surrounding whitespace and trailing slashes are removed.
pub fn normalize_server_url(server_url: &str) -> String {
    server_url.trim().trim_end_matches('/').to_string()
}
