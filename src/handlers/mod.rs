//! HTTP handlers sitting between axum and the resolver.

pub mod account_handlers;
pub mod auth_handlers;
pub mod container_handlers;
pub mod health_handlers;
pub mod listing;
pub mod object_handlers;
pub mod swift_handler;
