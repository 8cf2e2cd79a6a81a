//! habitbreak: a tracker for recurring habits the user is trying to resist.
//!
//! Two halves share the wire model in [`models`]: the HTTP service behind
//! the `habitbreak-server` binary (handlers, Postgres storage, rolling
//! 30-day analytics) and the [`client`] synchronization layer a desktop
//! shell embeds.

use sqlx::PgPool;

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}
