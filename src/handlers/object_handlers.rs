//! Object-level verbs on `/v1/AUTH_<account>/<container>/<object>`.
//! Bodies are buffered in memory; the container is known to exist here.

use super::swift_handler::SwiftRequest;
use crate::{
    errors::SwiftError,
    models::{
        metadata::ResourceKind,
        object::{Object, content_etag},
    },
    services::resolver::ObjectResource,
};
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::Response,
};
use tracing::debug;

const VERSION_ID: HeaderName = HeaderName::from_static("x-object-version-id");
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn handle(
    resource: ObjectResource<'_>,
    request: SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    match *request.method {
        Method::GET => get_object(&resource),
        Method::HEAD => head_object(&resource),
        Method::PUT => put_object(resource, request),
        Method::POST => post_object(resource, &request),
        Method::DELETE => delete_object(resource),
        _ => Err(SwiftError::method_not_allowed(request.method.as_str())),
    }
}

/// The stored object, checked against the requested `versionId` if any.
fn existing<'o>(resource: &'o ObjectResource<'_>) -> Result<&'o Object, SwiftError> {
    let object = resource.object().ok_or_else(SwiftError::no_such_key)?;
    match &resource.version {
        Some(version) if *version != object.version_id => Err(SwiftError::no_such_version()),
        _ => Ok(object),
    }
}

/// GET: content plus object headers.
fn get_object(resource: &ObjectResource<'_>) -> Result<Response, SwiftError> {
    let object = existing(resource)?;
    let mut response = Response::new(Body::from(object.content.clone()));
    *response.status_mut() = StatusCode::OK;
    set_object_headers(response.headers_mut(), object);
    Ok(response)
}

/// HEAD: same headers as GET but no body.
fn head_object(resource: &ObjectResource<'_>) -> Result<Response, SwiftError> {
    let object = existing(resource)?;
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    set_object_headers(response.headers_mut(), object);
    Ok(response)
}

/// PUT: replace the object wholesale. A supplied `ETag` must match the MD5
/// of the body.
fn put_object(
    resource: ObjectResource<'_>,
    request: SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    let etag = content_etag(&request.body);
    if let Some(expected) = request.headers.get(header::ETAG) {
        let expected = String::from_utf8_lossy(expected.as_bytes());
        if !expected.trim_matches('"').eq_ignore_ascii_case(&etag) {
            debug!("etag mismatch for {}: {} != {}", resource.name, expected, etag);
            return Err(SwiftError::bad_digest());
        }
    }

    let name = resource.name.clone();
    let object = resource.put(Object::new(name, request.body));
    object
        .metadata
        .set_metadata(ResourceKind::Object, request.headers, request.policy);
    debug!("stored object {} ({} bytes)", object.name, object.size());

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::CREATED;
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&object.etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&object.version_id) {
        headers.insert(VERSION_ID, value);
    }
    Ok(response)
}

/// POST: merge metadata into an existing object.
fn post_object(
    mut resource: ObjectResource<'_>,
    request: &SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    let object = resource.object_mut().ok_or_else(SwiftError::no_such_key)?;
    object
        .metadata
        .set_metadata(ResourceKind::Object, request.headers, request.policy);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::ACCEPTED;
    Ok(response)
}

/// DELETE: remove the object.
fn delete_object(resource: ObjectResource<'_>) -> Result<Response, SwiftError> {
    let object = resource.remove().ok_or_else(SwiftError::no_such_key)?;
    debug!("deleted object {}", object.name);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    Ok(response)
}

fn set_object_headers(headers: &mut HeaderMap, object: &Object) {
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(object.size()));

    if let Ok(value) = HeaderValue::from_str(&object.etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&object.version_id) {
        headers.insert(VERSION_ID, value);
    }
    if let Ok(value) = HeaderValue::from_str(&object.last_modified.format(HTTP_DATE).to_string())
    {
        headers.insert(header::LAST_MODIFIED, value);
    }

    object.metadata.get_metadata(headers);
}
