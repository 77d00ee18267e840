//! Defines routes for the mock Swift API.
//!
//! ## Structure
//! - **Service endpoints**
//!   - `GET /healthz`, `GET /readyz` — liveness and readiness
//!   - `GET /auth/v1.0` (and `/auth/v1`) — token issuance
//!
//! - **Swift API** (fallback, every other path)
//!   - `/v1/AUTH_{account}` — account GET / HEAD / POST
//!   - `/v1/AUTH_{account}/{container}` — container GET / HEAD / PUT / POST / DELETE
//!   - `/v1/AUTH_{account}/{container}/{*object}` — object GET / HEAD / PUT / POST / DELETE
//!
//! The Swift API is matched by the resolver rather than the router, so paths
//! that do not fit the pattern get a Swift `InvalidURI` error instead of a
//! bare 404.

use crate::{
    handlers::{
        auth_handlers::authenticate,
        health_handlers::{healthz, readyz},
        swift_handler::serve_swift,
    },
    services::storage_service::StorageService,
};
use axum::{Router, extract::DefaultBodyLimit, routing::get};

/// Build and return the router carrying `StorageService` as shared state.
pub fn routes() -> Router<StorageService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // auth
        .route("/auth/v1.0", get(authenticate))
        .route("/auth/v1", get(authenticate))
        // everything else is resolved as a Swift path
        .fallback(serve_swift)
        .layer(DefaultBodyLimit::disable())
}

/// The full application for `service`.
pub fn app(service: StorageService) -> Router {
    routes().with_state(service)
}
