//! # TzTalk Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The domain modules shared by the CLI commands and the REST service. None of
//! them know about clap or axum; commands in `commands::` wire them to the
//! terminal and to HTTP.
//!
//! ## Architecture
//!
//! - **`timezone`**: Zone catalog, wall-clock conversion, display formatting and hour offsets.
//! - **`chatbot`**: FAQ catalog, keyword matcher with injectable fallback selection, chat transcript.
//! - **`store`**: REST records, the `Repository` trait, the in-memory backend and demo data.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{chatbot, store, timezone};
//!
//! let diff = timezone::convert::hour_offset("UTC", "Asia/Tokyo")?;
//! let entries = chatbot::catalog::default_entries();
//! let store = store::seed::seeded_store(chrono::Utc::now())?;
//! ```
//!

/// Keyword-matching FAQ chatbot.
pub mod chatbot;
/// Repositories and REST records.
pub mod store;
/// Time zone conversion and offset arithmetic.
pub mod timezone;
