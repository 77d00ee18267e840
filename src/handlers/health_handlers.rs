//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the storage lock is obtainable

use crate::services::storage_service::StorageService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;

const LOCK_WAIT: Duration = Duration::from_secs(1);

/// `GET /healthz`
///
/// Very small liveness probe; always returns 200 OK with a plain JSON body.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Takes the storage lock within one second and reports how many accounts
/// exist. HTTP 503 when the lock cannot be obtained in time or no account
/// has been seeded yet.
pub async fn readyz(State(service): State<StorageService>) -> impl IntoResponse {
    let accounts = match timeout(LOCK_WAIT, service.lock()).await {
        Ok(storage) => Some(storage.accounts.len()),
        Err(_) => None,
    };

    let ready = accounts.is_some_and(|n| n > 0);
    let body = ReadyResponse {
        status: if ready { "ok".into() } else { "error".into() },
        accounts,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    accounts: Option<usize>,
}
