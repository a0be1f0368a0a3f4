//! Project-wide constants.

use std::path::PathBuf;

pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Production API origin used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.mynido.app/v1";

/// Environment variable that overrides the base URL (scripts, tests).
pub const ENV_BASE_URL: &str = "NIDO_BASE_URL";

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Default database path: `~/.nido/nido.db`.
/// Single DB for the session and config stores.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .expect("cannot determine home directory")
        .join(".nido")
        .join("nido.db")
}

/// Format an amount in cents as a currency string (`12345` cents → `$123.45`).
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// Parse a user-entered amount (`"450"`, `"450.5"`, `"450.00"`) into cents.
pub fn parse_amount(input: &str) -> Option<i64> {
    let input = input.trim().trim_start_matches('$');
    let (dollars, cents) = match input.split_once('.') {
        Some((d, c)) => (d, c),
        None => (input, ""),
    };
    let dollars: i64 = dollars.parse().ok()?;
    let cents: i64 = match cents.len() {
        0 => 0,
        1 => cents.parse::<i64>().ok()? * 10,
        2 => cents.parse().ok()?,
        _ => return None,
    };
    if dollars < 0 {
        return None;
    }
    Some(dollars * 100 + cents)
}
