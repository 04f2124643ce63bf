//! # TzTalk Time Zone Offset Command
//!
//! File: cli/src/commands/tz/offset.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk tz offset FROM TO`: prints how many whole hours `TO`
//! is ahead of (or behind) `FROM`. The offset is evaluated now unless
//! `--at` supplies an RFC 3339 instant.
//!
//! ```bash
//! tztalk tz offset UTC Europe/Paris --at 2024-01-15T12:00:00Z
//! # Europe/Paris vs UTC: +1 hours
//! ```
//!
use crate::common::timezone::convert;
use crate::core::error::{Result, TzTalkError};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;

/// # Offset Arguments (`OffsetArgs`)
#[derive(Parser, Debug)]
pub struct OffsetArgs {
    /// Reference zone.
    pub from: String,

    /// Zone compared against the reference.
    pub to: String,

    /// Evaluate at this RFC 3339 instant instead of now.
    #[arg(long)]
    pub at: Option<String>,
}

/// # Handle Offset Command (`handle_offset`)
///
/// ## Returns
///
/// * `Result<()>`: An error when either zone is unknown or `--at` does not parse.
pub async fn handle_offset(args: OffsetArgs) -> Result<()> {
    let at = match &args.at {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    info!("Computing offset {} -> {} at {}", args.from, args.to, at);

    let hours = convert::hour_offset_at(&args.from, &args.to, at)?;
    println!("{} vs {}: {}", args.to, args.from, convert::describe_offset(hours));
    Ok(())
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            TzTalkError::InvalidInput {
                input: raw.to_string(),
                reason: format!("expected an RFC 3339 instant ({})", e),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_normalises_to_utc() {
        let instant = parse_instant("2024-01-15T13:00:00+01:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-01-15T12:00:00+00:00");
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        let err = parse_instant("yesterday").unwrap_err();
        assert!(err.to_string().starts_with("Invalid input 'yesterday'"));
    }
}
