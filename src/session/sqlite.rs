use std::sync::Mutex;

use anyhow::Result;
use rusqlite::Connection;

use super::{Profile, SessionStore};

/// Session storage in SQLite.
///
/// Shares a database with [`Config`](crate::config::Config); pass the same
/// path to both. Use `":memory:"` for tests.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

const KEY_TOKEN: &str = "token";
const KEY_PROFILE: &str = "profile";

impl SqliteSessionStore {
    /// Open or create the session table in the given database path.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM session WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO session (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM session WHERE key = ?1", [key])?;
        Ok(())
    }
}

impl SessionStore for SqliteSessionStore {
    fn token(&self) -> Option<String> {
        // An unreadable store presents as logged out.
        self.get(KEY_TOKEN).ok().flatten()
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.set(KEY_TOKEN, token)
    }

    fn clear(&self) -> Result<()> {
        self.remove(KEY_TOKEN)?;
        self.remove(KEY_PROFILE)?;
        Ok(())
    }

    fn profile(&self) -> Option<Profile> {
        let json = self.get(KEY_PROFILE).ok().flatten()?;
        serde_json::from_str(&json).ok()
    }

    fn set_profile(&self, profile: &Profile) -> Result<()> {
        self.set(KEY_PROFILE, &serde_json::to_string(profile)?)
    }
}
