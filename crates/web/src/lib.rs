//! Deposit web library.
//!
//! Storage deposit quoting and intake service: a public quote calculator,
//! an intake form that records submissions and notifies staff over
//! Telegram, and a session-protected listing of intake records.
//!
//! The crate is a library so that the router can be driven from tests and
//! the CLI can reuse the repositories and auth service.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
