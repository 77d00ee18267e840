//! Entry point for every `/v1/AUTH_<account>/...` request.
//!
//! Resolves the percent-decoded path under the storage lock and hands the
//! resource to the account, container or object handler for the request
//! method. Errors from either step become the whole response.

use super::{account_handlers, container_handlers, object_handlers};
use crate::{
    errors::SwiftError,
    models::metadata::MetadataPolicy,
    services::{resolver::Resource, storage_service::StorageService},
};
use axum::{
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::debug;

pub const TRANS_ID_HEADER: HeaderName = HeaderName::from_static("x-trans-id");

/// Query parameters understood by the Swift handlers. Unknown ones are
/// ignored.
#[derive(Debug, Default)]
pub struct SwiftQuery {
    pub version_id: Option<String>,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub marker: Option<String>,
    pub end_marker: Option<String>,
    pub limit: Option<usize>,
}

impl SwiftQuery {
    /// Build from decoded `key=value` pairs. The first usable occurrence of a key
    /// wins and a `limit` that is not a non-negative integer is dropped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "versionId" => &mut query.version_id,
                "prefix" => &mut query.prefix,
                "delimiter" => &mut query.delimiter,
                "marker" => &mut query.marker,
                "end_marker" => &mut query.end_marker,
                "limit" => {
                    if query.limit.is_none() {
                        let value: String = value.into();
                        query.limit = value.trim().parse().ok();
                    }
                    continue;
                }
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }
}

/// Everything a verb handler needs from the inbound request.
pub struct SwiftRequest<'r> {
    pub method: &'r Method,
    pub query: &'r SwiftQuery,
    pub headers: &'r HeaderMap,
    pub body: Bytes,
    pub policy: &'r MetadataPolicy,
}

/// Fallback handler: everything that is not auth or health lands here.
pub async fn serve_swift(
    State(service): State<StorageService>,
    method: Method,
    uri: Uri,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let trans_id = service.next_trans_id();
    debug!(%method, path = uri.path(), %trans_id, "swift request");

    let query = match pairs {
        Ok(Query(pairs)) => SwiftQuery::from_pairs(pairs),
        Err(err) => {
            debug!(%trans_id, "ignoring unparsable query: {}", err);
            SwiftQuery::default()
        }
    };

    let request = SwiftRequest {
        method: &method,
        query: &query,
        headers: &headers,
        body,
        policy: &service.policy,
    };

    let result = match percent_decode_str(uri.path()).decode_utf8() {
        Ok(path) => {
            let mut storage = service.lock().await;
            storage
                .resolve(&path, query.version_id.as_deref())
                .and_then(|resource| dispatch(resource, request))
        }
        Err(_) => Err(SwiftError::invalid_uri(format!(
            "Couldn't parse the specified URI `{}`",
            uri.path()
        ))),
    };

    let mut response = match result {
        Ok(response) => response,
        Err(err) => {
            debug!(%trans_id, status = err.status.as_u16(), "{}", err);
            err.into_response()
        }
    };
    if let Ok(value) = HeaderValue::from_str(&trans_id) {
        response.headers_mut().insert(TRANS_ID_HEADER, value);
    }
    response
}

fn dispatch(resource: Resource<'_>, request: SwiftRequest<'_>) -> Result<Response, SwiftError> {
    match resource {
        Resource::Root(root) => account_handlers::handle(root, request),
        Resource::Container(container) => container_handlers::handle(container, request),
        Resource::Object(object) => object_handlers::handle(object, request),
    }
}
