//! CLI subcommand handlers, one module per resource.
//!
//! Handlers take the [`NurseryApi`] they operate on and plain argument
//! values; clap parsing stays in `main.rs`. Failures bubble up as
//! `anyhow::Error` and `main` renders them through [`describe`].

pub mod auth;
pub mod children;
pub mod classrooms;
pub mod payments;
pub mod reports;
pub mod teachers;
pub mod upload;

use crate::api::ApiError;

/// Short, user-facing message for a failure. HTTP statuses with a stock
/// meaning get hardcoded text; everything else falls back to the server's
/// message or a generic line.
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api) => describe_api(api),
        None => err.to_string(),
    }
}

pub fn describe_api(err: &ApiError) -> String {
    match err {
        ApiError::Http { status: 401, .. } => "wrong credentials".to_string(),
        ApiError::Http { status: 403, .. } => "you are not allowed to do that".to_string(),
        ApiError::Http { status: 404, .. } => "not found".to_string(),
        ApiError::Http { status, .. } => match err.message() {
            Some(message) => message.to_string(),
            None => format!("server error (HTTP {status})"),
        },
        ApiError::Transport(_) => "network problem, check your connection".to_string(),
        ApiError::Decode(_) => "unexpected response from the server".to_string(),
        ApiError::Cancelled => "cancelled".to_string(),
    }
}
