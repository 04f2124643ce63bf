//! # TzTalk Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the application-level error type used by the command
//! handlers and the configuration system. Domain modules keep their own error
//! enums close to the code that raises them:
//!
//! - `common::timezone::TimeZoneError` for zone resolution and formatting
//! - `common::store::StoreError` for repository failures
//! - `commands::srv::error::ApiError` for HTTP responses
//!
//! ## Architecture
//!
//! - `TzTalkError`: A `thiserror` enum for failures surfaced to the CLI user
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so handlers can attach context
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !catalog::is_supported(zone) {
//!     return Err(TzTalkError::Config(format!("Unsupported zone: {}", zone)))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use crate::common::store::StoreError;
use crate::common::timezone::TimeZoneError;
use thiserror::Error;

/// Custom error type for the TzTalk application.
#[derive(Error, Debug)]
pub enum TzTalkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Time zone error: {source}")]
    TimeZone {
        #[from]
        source: TimeZoneError,
    },

    #[error("Storage error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
