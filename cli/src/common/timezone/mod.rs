//! # TzTalk Time Zone Utilities (`common::timezone`)
//!
//! File: cli/src/common/timezone/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Pure functions for moving wall-clock readings between IANA time zones and
//! describing the distance between two zones. Everything here is synchronous
//! and stateless; the zone database comes from `chrono-tz`.
//!
//! ## Architecture
//!
//! - **`catalog`**: The curated list of selectable zones, label lookup and host zone detection.
//! - **`convert`**: `WallClockTime`, conversion, display formatting and offset arithmetic.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::timezone::{self, convert};
//!
//! let local = convert::parse_local("2024-06-01", "15:00")?;
//! let paris = convert::convert(local, "America/Los_Angeles", "Europe/Paris")?;
//! println!("{}", paris); // 2024-06-02 00:00 (Europe/Paris)
//!
//! let diff = convert::hour_offset("UTC", "Asia/Tokyo")?;
//! println!("{}", convert::describe_offset(diff)); // +9 hours
//! ```
//!
use thiserror::Error;

/// Curated zone catalog and host zone detection.
pub mod catalog;
/// Conversion, formatting and offset arithmetic.
pub mod convert;

pub use convert::WallClockTime;

/// Errors raised while resolving zones or parsing clock input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeZoneError {
    #[error("Unknown time zone '{0}'")]
    UnknownZone(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidClock(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid display pattern '{0}'")]
    InvalidPattern(String),

    #[error("Local time {local} does not exist in {zone}")]
    NonexistentLocalTime { local: String, zone: String },
}
