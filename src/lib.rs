//! In-memory mock of the Swift object storage REST API.
//!
//! Start a [`server::SwiftServer`] in a test, point a client at its
//! `auth_url`, and the requests are answered from an in-process account →
//! container → object store. [`routes::app`] exposes the same service as a
//! plain axum `Router` for driving it without a socket.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;

pub use config::AppConfig;
pub use errors::SwiftError;
pub use server::SwiftServer;
pub use services::storage_service::StorageService;
