//! Client library for the Nido nursery-management API.
//!
//! Everything network-shaped goes through [`api::ApiClient`]; the session
//! store holds the bearer token between runs, and [`nursery`] exposes the
//! typed endpoint surface the CLI is built on.

pub mod api;
pub mod auth;
pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod nursery;
pub mod session;
pub mod spinner;
