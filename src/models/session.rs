use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// The payload of a session token.
///
/// The token is only base64-encoded JSON. It carries no signature, so any
/// holder can read or rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The ID of the user this session belongs to.
    pub id: u64,
    pub email: String,
    /// The role at the time the session was created.
    pub role: Role,
    /// Expiry as Unix milliseconds.
    pub exp: i64,
}
