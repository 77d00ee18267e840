//! Account-level verbs on `/v1/AUTH_<account>`.

use super::{
    listing::{plain_listing, select_names},
    swift_handler::SwiftRequest,
};
use crate::{
    errors::SwiftError,
    models::{account::Account, metadata::ResourceKind},
    services::resolver::RootResource,
};
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::Response,
};

const CONTAINER_COUNT: HeaderName = HeaderName::from_static("x-account-container-count");
const OBJECT_COUNT: HeaderName = HeaderName::from_static("x-account-object-count");
const BYTES_USED: HeaderName = HeaderName::from_static("x-account-bytes-used");

pub fn handle(root: RootResource<'_>, request: SwiftRequest<'_>) -> Result<Response, SwiftError> {
    match *request.method {
        Method::GET => Ok(list_containers(root.account, &request)),
        Method::HEAD => Ok(head_account(root.account)),
        Method::POST => Ok(post_account(root.account, &request)),
        _ => Err(SwiftError::method_not_allowed(request.method.as_str())),
    }
}

/// GET: sorted plain-text container names.
fn list_containers(account: &Account, request: &SwiftRequest<'_>) -> Response {
    let names = select_names(
        account.ordered_containers().into_iter().map(|c| c.name.as_str()),
        request.query,
    );
    let mut response = plain_listing(&names);
    set_account_headers(response.headers_mut(), account);
    response
}

/// HEAD: usage headers and metadata, no body.
fn head_account(account: &Account) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    set_account_headers(response.headers_mut(), account);
    response
}

/// POST: merge account metadata.
fn post_account(account: &mut Account, request: &SwiftRequest<'_>) -> Response {
    account
        .metadata
        .set_metadata(ResourceKind::Account, request.headers, request.policy);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

fn set_account_headers(headers: &mut HeaderMap, account: &Account) {
    headers.insert(CONTAINER_COUNT, HeaderValue::from(account.container_count()));
    headers.insert(OBJECT_COUNT, HeaderValue::from(account.object_count()));
    headers.insert(BYTES_USED, HeaderValue::from(account.bytes_used()));
    account.metadata.get_metadata(headers);
}
