use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Structured abort for the current request.
///
/// Carries the HTTP status, a short machine-readable code (`NoSuchAccount`,
/// `InvalidURI`, ...) and a human-readable message. Returning it from the
/// resolver or a handler ends the request; the HTTP layer renders it through
/// [`IntoResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl SwiftError {
    pub fn new(status: StatusCode, code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: msg.into(),
        }
    }

    /// The request path does not have the `/v1/AUTH_<account>/...` shape.
    pub fn invalid_uri(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "InvalidURI", msg)
    }

    pub fn no_such_account() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NoSuchAccount",
            "The specified account does not exist",
        )
    }

    pub fn no_such_container() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NoSuchContainer",
            "The specified container does not exist",
        )
    }

    pub fn no_such_key() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NoSuchKey",
            "The specified key does not exist",
        )
    }

    pub fn no_such_version() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NoSuchVersion",
            "The specified version does not exist",
        )
    }

    pub fn container_not_empty() -> Self {
        Self::new(
            StatusCode::CONFLICT,
            "ContainerNotEmpty",
            "The container you tried to delete is not empty",
        )
    }

    pub fn bad_digest() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "BadDigest",
            "The ETag you specified did not match what we received",
        )
    }

    pub fn method_not_allowed(method: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "MethodNotAllowed",
            format!("The method {method} is not allowed against this resource"),
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Invalid credentials",
        )
    }
}

impl fmt::Display for SwiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SwiftError {}

impl IntoResponse for SwiftError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code,
            "message": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}
