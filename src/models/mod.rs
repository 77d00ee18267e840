//! Core data model of the mock Swift service.
//!
//! An [`account::Account`] owns [`container::Container`]s which own
//! [`object::Object`]s; each level carries its own [`metadata::Metadata`].
//! Everything lives in memory for the lifetime of the process.

pub mod account;
pub mod container;
pub mod metadata;
pub mod object;
pub mod ordered;
pub mod session;
