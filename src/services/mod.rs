//! Request resolution and the shared in-memory store.

pub mod path_parser;
pub mod resolver;
pub mod storage_service;
