//! Plain-text enumeration shared by account and container listings.

use super::swift_handler::SwiftQuery;
use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};

/// Upper bound on entries in one listing, whatever `limit` asks for.
pub const MAX_LISTING: usize = 10_000;

/// Apply `prefix`, `delimiter`, `marker`, `end_marker` and `limit` to names
/// that are already sorted.
///
/// With a delimiter, names sharing the same prefix up to and including the
/// first delimiter after `prefix` collapse into that single prefix entry.
/// `marker` is matched against the collapsed entry, so passing back the last
/// returned entry continues after it.
pub fn select_names<'a, I>(sorted: I, query: &SwiftQuery) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = query.prefix.as_deref().unwrap_or("");
    let delimiter = query.delimiter.as_deref().filter(|d| !d.is_empty());
    let limit = query.limit.unwrap_or(MAX_LISTING).min(MAX_LISTING);

    let mut out: Vec<String> = Vec::new();
    for name in sorted {
        if out.len() >= limit {
            break;
        }
        if !name.starts_with(prefix) {
            continue;
        }
        if query.end_marker.as_deref().is_some_and(|m| name >= m) {
            break;
        }

        let entry = match delimiter {
            Some(delim) => match name[prefix.len()..].find(delim) {
                Some(pos) => &name[..prefix.len() + pos + delim.len()],
                None => name,
            },
            None => name,
        };
        if query.marker.as_deref().is_some_and(|m| name <= m || entry <= m) {
            continue;
        }
        if out.last().map(String::as_str) != Some(entry) {
            out.push(entry.to_string());
        }
    }
    out
}

/// One name per line; 204 with an empty body when there is nothing to list.
pub fn plain_listing(names: &[String]) -> Response {
    if names.is_empty() {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        return response;
    }

    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('\n');
    }

    let mut response = Response::new(Body::from(text));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    *response.status_mut() = StatusCode::OK;
    response
}
