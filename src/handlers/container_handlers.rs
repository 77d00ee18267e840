//! Container-level verbs on `/v1/AUTH_<account>/<container>`.
//!
//! PUT is the only verb that accepts a container that does not exist yet;
//! every other verb answers `NoSuchContainer` for it.

use super::{
    listing::{plain_listing, select_names},
    swift_handler::SwiftRequest,
};
use crate::{
    errors::SwiftError,
    models::{container::Container, metadata::ResourceKind},
    services::resolver::ContainerResource,
};
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::Response,
};
use tracing::info;

const OBJECT_COUNT: HeaderName = HeaderName::from_static("x-container-object-count");
const BYTES_USED: HeaderName = HeaderName::from_static("x-container-bytes-used");

pub fn handle(
    resource: ContainerResource<'_>,
    request: SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    match *request.method {
        Method::GET => list_objects(&resource, &request),
        Method::HEAD => head_container(&resource),
        Method::PUT => Ok(put_container(resource, &request)),
        Method::POST => post_container(resource, &request),
        Method::DELETE => delete_container(resource),
        _ => Err(SwiftError::method_not_allowed(request.method.as_str())),
    }
}

fn existing<'c>(resource: &'c ContainerResource<'_>) -> Result<&'c Container, SwiftError> {
    resource.container().ok_or_else(SwiftError::no_such_container)
}

/// GET: sorted plain-text object names.
fn list_objects(
    resource: &ContainerResource<'_>,
    request: &SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    let container = existing(resource)?;
    let names = select_names(
        container.ordered_objects().into_iter().map(|o| o.name.as_str()),
        request.query,
    );
    let mut response = plain_listing(&names);
    set_container_headers(response.headers_mut(), container);
    Ok(response)
}

/// HEAD: usage headers and metadata, no body.
fn head_container(resource: &ContainerResource<'_>) -> Result<Response, SwiftError> {
    let container = existing(resource)?;
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    set_container_headers(response.headers_mut(), container);
    Ok(response)
}

/// PUT: create the container if needed (201), else accept (202). Metadata is
/// merged either way.
fn put_container(resource: ContainerResource<'_>, request: &SwiftRequest<'_>) -> Response {
    let (container, created) = resource.get_or_create();
    if created {
        info!("created container {}", container.name);
    }
    container
        .metadata
        .set_metadata(ResourceKind::Container, request.headers, request.policy);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = if created {
        StatusCode::CREATED
    } else {
        StatusCode::ACCEPTED
    };
    response
}

/// POST: merge metadata into an existing container.
fn post_container(
    mut resource: ContainerResource<'_>,
    request: &SwiftRequest<'_>,
) -> Result<Response, SwiftError> {
    let container = resource
        .container_mut()
        .ok_or_else(SwiftError::no_such_container)?;
    container
        .metadata
        .set_metadata(ResourceKind::Container, request.headers, request.policy);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    Ok(response)
}

/// DELETE: only empty containers can be removed.
fn delete_container(resource: ContainerResource<'_>) -> Result<Response, SwiftError> {
    if !existing(&resource)?.is_empty() {
        return Err(SwiftError::container_not_empty());
    }
    if let Some(container) = resource.remove() {
        info!("deleted container {}", container.name);
    }

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    Ok(response)
}

fn set_container_headers(headers: &mut HeaderMap, container: &Container) {
    headers.insert(OBJECT_COUNT, HeaderValue::from(container.object_count()));
    headers.insert(BYTES_USED, HeaderValue::from(container.bytes_used()));
    container.metadata.get_metadata(headers);
}
