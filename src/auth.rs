//! Login, signup, and logout flows.
//!
//! These are the only code paths that mutate the session store; the
//! executor itself only ever reads it. A failed login (wrong credentials,
//! server down) leaves the store untouched.

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use crate::api::{ApiClient, RequestHooks, RequestOptions};
use crate::session::Profile;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const LOGOUT_ENDPOINT: &str = "/auth/logout";

/// A parent account signup request.
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Sign in and persist the returned token and profile.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<Profile> {
    let body = json!({ "email": email, "password": password });
    let data = client
        .request(LOGIN_ENDPOINT, RequestHooks::new(), RequestOptions::post(body))
        .await?;

    store_session(client, &data).context("login response was not usable")
}

/// Create a parent account. The API signs the new account in, so the
/// response carries the same token/user envelope as login.
pub async fn signup(client: &ApiClient, signup: &Signup) -> Result<Profile> {
    let body = json!({
        "name": signup.name,
        "email": signup.email,
        "password": signup.password,
        "phone": signup.phone,
    });
    let data = client
        .request(REGISTER_ENDPOINT, RequestHooks::new(), RequestOptions::post(body))
        .await?;

    store_session(client, &data).context("signup response was not usable")
}

/// Tell the server goodbye (best effort) and always clear the local session.
pub async fn logout(client: &ApiClient) -> Result<()> {
    // The token may already be invalid server-side; that is not a reason
    // to keep it locally.
    let _ = client
        .request(LOGOUT_ENDPOINT, RequestHooks::new(), RequestOptions::post(json!({})))
        .await;

    client.session().clear()?;
    Ok(())
}

fn store_session(client: &ApiClient, data: &Value) -> Result<Profile> {
    let token = data
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("response is missing the token field"))?;
    let profile: Profile = serde_json::from_value(
        data.get("user").cloned().unwrap_or(Value::Null),
    )
    .context("malformed user object")?;

    client.session().set_token(token)?;
    client.session().set_profile(&profile)?;
    Ok(profile)
}
