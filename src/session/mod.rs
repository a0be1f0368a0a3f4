//! The persisted session: bearer token plus the signed-in user's profile.
//!
//! The store is injected into [`ApiClient`](crate::api::ApiClient) rather
//! than read from ambient global state, so tests can pass a
//! [`MemorySessionStore`] and the executor stays oblivious to where the
//! token lives. Only the auth flows mutate it; the executor just reads.

mod memory;
mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Who is signed in. Shapes are owned by the remote API; unknown fields in
/// the `user` payload are dropped here because only these are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Account role, mirrored from the API's `user.role` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Parent => write!(f, "parent"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Where the bearer token and profile live between runs.
///
/// `token` is infallible: a store that cannot be read presents as logged
/// out, which is exactly how an expired browser session behaves.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, or `None` when logged out.
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str) -> Result<()>;

    /// Forget the token and the profile.
    fn clear(&self) -> Result<()>;

    fn profile(&self) -> Option<Profile>;

    fn set_profile(&self, profile: &Profile) -> Result<()>;
}
