//! `GET /auth/v1.0`: v1 auth exchanging account credentials for a token.
//!
//! Tokens are recorded as sessions but the API routes do not check them.

use crate::{errors::SwiftError, services::storage_service::StorageService};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::Response,
};
use tracing::{debug, info};

const AUTH_USER: HeaderName = HeaderName::from_static("x-auth-user");
const AUTH_KEY: HeaderName = HeaderName::from_static("x-auth-key");
const AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");
const STORAGE_TOKEN: HeaderName = HeaderName::from_static("x-storage-token");
const STORAGE_URL: HeaderName = HeaderName::from_static("x-storage-url");

/// Authenticate `X-Auth-User` / `X-Auth-Key`.
///
/// The user may be given as `account` or `account:user`; only the account
/// part is matched. On success returns 204 with `X-Auth-Token` and
/// `X-Storage-Url` pointing at the account under the advertised API URL. A
/// router served without one falls back to the request's `Host` header.
pub async fn authenticate(
    State(service): State<StorageService>,
    headers: HeaderMap,
) -> Result<Response, SwiftError> {
    let user = header_str(&headers, &AUTH_USER).ok_or_else(SwiftError::unauthorized)?;
    let key = header_str(&headers, &AUTH_KEY).ok_or_else(SwiftError::unauthorized)?;
    let account = user.split(':').next().unwrap_or(user);

    let token = service
        .lock()
        .await
        .authenticate(account, key)
        .ok_or_else(|| {
            debug!("rejected credentials for {}", account);
            SwiftError::unauthorized()
        })?;
    info!("issued token for account {}", account);

    let storage_url = match service.api_url() {
        Some(url) => format!("{}/AUTH_{}", url, account),
        None => {
            let host = header_str(&headers, &header::HOST).unwrap_or("localhost");
            format!("http://{}/v1/AUTH_{}", host, account)
        }
    };

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    let out = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&token) {
        out.insert(AUTH_TOKEN, value.clone());
        out.insert(STORAGE_TOKEN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&storage_url) {
        out.insert(STORAGE_URL, value);
    }
    Ok(response)
}

fn header_str<'h>(headers: &'h HeaderMap, name: &HeaderName) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}
