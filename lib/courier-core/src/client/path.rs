use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::warn;
use url::Url;

use super::error::ClientError;
use super::parameters::CallQuery;

/// Characters kept as is in a path: alphanumerics and `!$&'()*+,-./:;=@_~`.
const PATH_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@')
    .remove(b'_')
    .remove(b'~');

/// Characters kept as is in a query: the path set plus `?`.
const QUERY_ALLOWED: &AsciiSet = &PATH_ALLOWED.remove(b'?');

/// Percent-encode a path using the path-allowed character set.
fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ALLOWED).to_string()
}

/// Percent-encode an already assembled query suffix.
///
/// `&`, `=` and `+` are left untouched, so they keep their separator meaning
/// even when they come from a value.
fn encode_query(raw_query: &str) -> String {
    utf8_percent_encode(raw_query, QUERY_ALLOWED).to_string()
}

/// Joins `base_url`, the encoded `path` and the encoded `query`.
///
/// The base URL is used verbatim: it already ends with `/`, and `path` is appended
/// to it without any separator handling.
///
/// The URL parser escapes `'` in the query as `%27`, even though the query set allows it.
///
/// # Errors
///
/// Returns the `404` "Invalid URL." [`ClientError`] if the result does not parse as a URL,
/// or if parsing rewrites the path, as it does for `.` and `..` segments.
pub(in crate::client) fn build_url(
    base_url: &str,
    path: &str,
    query: &CallQuery,
) -> Result<Url, ClientError> {
    let encoded_path = encode_path(path);
    let mut url = format!("{base_url}{encoded_path}");
    if let Some(raw_query) = query.to_raw_query() {
        url.push_str(&encode_query(&raw_query));
    }

    let (parsed, base) = match (Url::parse(&url), Url::parse(base_url)) {
        (Ok(parsed), Ok(base)) => (parsed, base),
        (Err(error), _) | (_, Err(error)) => {
            warn!(%url, %error, "invalid request URL");
            return Err(ClientError::invalid_url());
        }
    };

    let expected_path = format!("{}{encoded_path}", base.path());
    if parsed.path() != expected_path {
        warn!(%url, resolved = %parsed, "request path does not stay under the base URL");
        return Err(ClientError::invalid_url());
    }
    Ok(parsed)
}
