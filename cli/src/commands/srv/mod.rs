//! # TzTalk REST Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `tztalk srv` runs the in-memory REST data layer used by the web client:
//! users, languages, sessions, the FAQ catalog, notifications and the time
//! zone helpers. Data lives only as long as the process.
//!
//! ## Architecture
//!
//! - `config.rs`: `SrvArgs` and the merged `ServerConfig`
//! - `state.rs`: `AppState` shared with every handler
//! - `error.rs`: `ApiError` and the JSON error body
//! - `routes/`: one module per resource
//! - `server_logic.rs`: port selection, middleware and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! tztalk srv
//! tztalk srv --port 8080 --host 0.0.0.0
//! tztalk srv --no-seed --no-cors
//! ```
//!
use crate::common::store::{seed, Store};
use crate::core::error::Result;
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// Configuration loading and merging for the API server.
pub mod config;

/// JSON error responses and rejection-mapping extractors.
pub mod error;

/// Route table and handlers.
pub mod routes;

/// The Axum server itself.
pub mod server_logic;

/// State shared by all handlers.
pub mod state;

/// # Handle Server Command (`handle_srv`)
///
/// Loads the configuration, builds the store (seeded with demo data unless
/// disabled) and runs the server until shutdown.
///
/// ## Arguments
///
/// * `args`: The parsed `SrvArgs`.
///
/// ## Returns
///
/// * `Result<()>`: Errors from configuration, seeding or the server itself.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", config);

    let store = if config.seed_data {
        seed::seeded_store(Utc::now()).context("Failed to seed demo data")?
    } else {
        Store::in_memory()
    };

    let state = Arc::new(state::AppState::new(config, store));
    server_logic::run_server(state).await
}
