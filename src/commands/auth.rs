//! `nido login`, `logout`, `signup`, and `whoami`.

use std::io::{self, Write};

use anyhow::Result;

use crate::api::ApiClient;
use crate::auth::{self, Signup};
use crate::banner::{BannerInfo, print_banner};

pub async fn login(client: &ApiClient, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };

    let profile = auth::login(client, email, &password).await?;
    println!("✓ signed in as {} ({})", profile.email, profile.role);
    Ok(())
}

pub async fn signup(
    client: &ApiClient,
    name: String,
    email: String,
    password: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Choose a password: ")?,
    };

    let profile = auth::signup(
        client,
        &Signup {
            name,
            email,
            password,
            phone,
        },
    )
    .await?;
    println!("✓ account created, signed in as {}", profile.email);
    Ok(())
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    auth::logout(client).await?;
    println!("✓ signed out");
    Ok(())
}

/// No network: shows what the local session believes.
pub fn whoami(client: &ApiClient, db_label: &str) {
    let (account, role) = match client.session().profile() {
        Some(profile) => (profile.email, profile.role.to_string()),
        None => ("not signed in".to_string(), "-".to_string()),
    };
    print_banner(&BannerInfo {
        server: client.base_url(),
        account: &account,
        role: &role,
        db: db_label,
    });
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let value = line.trim();
    anyhow::ensure!(!value.is_empty(), "nothing entered");
    Ok(value.to_string())
}
