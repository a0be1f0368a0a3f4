//! Key-value client configuration backed by SQLite.
//!
//! Shares a database with
//! [`SqliteSessionStore`](crate::session::SqliteSessionStore); pass the
//! same path to both. Known keys: `base_url`, `per_page`.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::sync::Mutex;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE, ENV_BASE_URL};

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Set a config value (upsert).
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Remove a config key.
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Resolve the API base URL. Precedence: explicit override (CLI flag),
    /// then the environment, then the stored value, then the production host.
    pub fn base_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL)
            && !url.is_empty()
        {
            return url;
        }
        match self.get("base_url") {
            Ok(Some(url)) => url,
            _ => DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Page size for list commands; falls back to the default on bad values.
    pub fn per_page(&self) -> u32 {
        self.get("per_page")
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_config() -> Config {
        Config::open(":memory:").unwrap()
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let config = mem_config();
        assert!(config.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let config = mem_config();
        config.set("base_url", "http://localhost:4000").unwrap();
        assert_eq!(
            config.get("base_url").unwrap().unwrap(),
            "http://localhost:4000"
        );
    }

    #[test]
    fn set_overwrites_existing() {
        let config = mem_config();
        config.set("per_page", "10").unwrap();
        config.set("per_page", "50").unwrap();
        assert_eq!(config.get("per_page").unwrap().unwrap(), "50");
    }

    #[test]
    fn remove_deletes_key() {
        let config = mem_config();
        config.set("base_url", "test").unwrap();
        config.remove("base_url").unwrap();
        assert!(config.get("base_url").unwrap().is_none());
    }

    #[test]
    fn remove_nonexistent_is_ok() {
        let config = mem_config();
        config.remove("nonexistent").unwrap();
    }

    #[test]
    fn base_url_defaults_to_production() {
        let config = mem_config();
        assert_eq!(config.base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_prefers_cli_override() {
        let config = mem_config();
        config.set("base_url", "http://stored").unwrap();
        assert_eq!(config.base_url(Some("http://flag")), "http://flag");
    }

    #[test]
    fn base_url_reads_stored_value() {
        let config = mem_config();
        config.set("base_url", "http://stored").unwrap();
        assert_eq!(config.base_url(None), "http://stored");
    }

    #[test]
    fn per_page_falls_back_on_garbage() {
        let config = mem_config();
        config.set("per_page", "lots").unwrap();
        assert_eq!(config.per_page(), DEFAULT_PER_PAGE);
    }

    #[test]
    fn per_page_parses_stored_value() {
        let config = mem_config();
        config.set("per_page", "5").unwrap();
        assert_eq!(config.per_page(), 5);
    }

    #[test]
    fn persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-test.db");
        let path_str = path.to_str().unwrap();

        {
            let config = Config::open(path_str).unwrap();
            config.set("base_url", "persisted").unwrap();
        }

        {
            let config = Config::open(path_str).unwrap();
            assert_eq!(config.get("base_url").unwrap().unwrap(), "persisted");
        }
    }
}
