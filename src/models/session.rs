//! Auth sessions handed out by the auth endpoint.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Name of the account the token was issued for.
    pub username: String,
}

/// A fresh opaque session token.
pub fn new_token() -> String {
    format!("AUTH_tk{}", Uuid::new_v4().simple())
}
