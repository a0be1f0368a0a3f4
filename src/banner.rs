//! Startup banner and session display.

use crate::consts::REPO;

/// Session configuration for display.
pub struct BannerInfo<'a> {
    pub server: &'a str,
    pub account: &'a str,
    pub role: &'a str,
    pub db: &'a str,
}

/// Print the banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║               N I D O                 ║
   ║      your nursery, on the console     ║
   ╚═══════════════════════════════════════╝

   version  {}
   repo     {}
   server   {}
   account  {}
   role     {}
   db       {}
"#,
        env!("CARGO_PKG_VERSION"),
        REPO,
        info.server,
        info.account,
        info.role,
        info.db,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_banner_does_not_panic() {
        let info = BannerInfo {
            server: "https://api.mynido.app/v1",
            account: "dana@example.com",
            role: "admin",
            db: ":memory:",
        };
        // Just verify it doesn't panic
        print_banner(&info);
    }
}
