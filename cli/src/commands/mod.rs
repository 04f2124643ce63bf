//! # TzTalk Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level command groups of the TzTalk CLI so
//! `main.rs` can route to them.
//!
//! ## Command Groups
//!
//! - `chat`: The FAQ chatbot on the terminal
//! - `srv`: The REST data layer
//! - `tz`: Time zone conversion and offsets
//!
//! Each group defines its own arguments structure and handler function.
//! Subcommands are declared inside their group's `mod.rs`.
//!

/// Command group for the FAQ chatbot. Includes `ask`, `questions` and `repl`.
pub mod chat;
/// The REST API server, with its configuration, routes and server logic.
pub mod srv;
/// Command group for the time zone converter. Includes `convert`, `offset`, `zones` and `detect`.
pub mod tz;
