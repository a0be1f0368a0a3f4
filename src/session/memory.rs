use std::sync::RwLock;

use anyhow::Result;

use super::{Profile, SessionStore};

/// In-process session store for tests and fakes.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    token: Option<String>,
    profile: Option<Profile>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out already holding `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.inner.write().unwrap().token = Some(token.to_string());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner.read().unwrap().token.clone()
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.inner.write().unwrap().token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner.token = None;
        inner.profile = None;
        Ok(())
    }

    fn profile(&self) -> Option<Profile> {
        self.inner.read().unwrap().profile.clone()
    }

    fn set_profile(&self, profile: &Profile) -> Result<()> {
        self.inner.write().unwrap().profile = Some(profile.clone());
        Ok(())
    }
}
