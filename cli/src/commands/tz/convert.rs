//! # TzTalk Time Zone Convert Command
//!
//! File: cli/src/commands/tz/convert.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk tz convert`: reads a clock time in one zone and shows
//! the same instant in another zone, plus the hour offset between them.
//!
//! ## Examples
//!
//! ```bash
//! tztalk tz convert 15:00 --date 2024-06-01 --from America/Los_Angeles --to UTC
//! ```
//!
//! Example output:
//!
//! ```
//! From: 3:00 PM  Jun 1, 2024  America/Los_Angeles (Pacific Time (UTC-08:00))
//! To:   10:00 PM  Jun 1, 2024  UTC (Universal Coordinated Time (UTC))
//! Offset: +7 hours
//! ```
//!
use crate::common::timezone::{catalog, convert, WallClockTime};
use crate::core::config;
use crate::core::error::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

/// # Convert Arguments (`ConvertArgs`)
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Clock time to convert, as HH:MM (24-hour).
    pub time: String,

    /// Calendar date as YYYY-MM-DD. Defaults to today in the source zone.
    #[arg(long, short)]
    pub date: Option<String>,

    /// Source zone. Defaults to the configured (or detected) home zone.
    #[arg(long, short)]
    pub from: Option<String>,

    /// Target zone. Defaults to the configured partner zone.
    #[arg(long, short)]
    pub to: Option<String>,

    /// strftime pattern for the clock times. Defaults to the configured format.
    #[arg(long)]
    pub format: Option<String>,
}

/// # Handle Convert Command (`handle_convert`)
///
/// Resolves defaults from configuration, converts the reading and prints
/// both sides of the conversion.
///
/// ## Arguments
///
/// * `args`: The parsed `ConvertArgs`.
///
/// ## Returns
///
/// * `Result<()>`: An error when the configuration fails to load, a zone is
///   unknown, or the date, time or format is malformed.
pub async fn handle_convert(args: ConvertArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let from_zone = args.from.unwrap_or_else(|| cfg.profile.home_zone());
    let to_zone = args.to.unwrap_or(cfg.profile.partner_time_zone);
    let pattern = args.format.unwrap_or(cfg.profile.time_format);
    info!("Converting {} from {} to {}", args.time, from_zone, to_zone);

    let source = convert::resolve_zone(&from_zone)?;
    let target = convert::resolve_zone(&to_zone)?;
    let date = match &args.date {
        Some(date) => convert::parse_date(date)?,
        None => Utc::now().with_timezone(&source).date_naive(),
    };
    let local = date.and_time(convert::parse_clock(&args.time)?);

    // Shifted forward when `local` falls in a DST gap.
    let instant = convert::to_instant(local, &from_zone)?;
    let original = WallClockTime::from_instant(instant, source);
    let converted = WallClockTime::from_instant(instant, target);
    debug!("Resolved instant: {}", instant);

    let offset = convert::hour_offset_at(&from_zone, &to_zone, instant)?;

    println!("{}", describe_side("From:", &original, &pattern)?);
    println!("{}", describe_side("To:  ", &converted, &pattern)?);
    println!("Offset: {}", convert::describe_offset(offset));
    Ok(())
}

/// One output line: clock, date, zone and its catalog label.
fn describe_side(prefix: &str, reading: &WallClockTime, pattern: &str) -> Result<String> {
    let zone = reading.zone().name();
    Ok(format!(
        "{} {}  {}  {} ({})",
        prefix,
        reading.format(pattern)?,
        reading.format(convert::DATE_LABEL_PATTERN)?,
        zone,
        catalog::label_for(zone)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_describe_side_line() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let reading = WallClockTime::new(date, 22, 0, "UTC").unwrap();
        let line = describe_side("To:  ", &reading, convert::DEFAULT_DISPLAY_PATTERN).unwrap();
        assert_eq!(
            line,
            "To:   10:00 PM  Jun 1, 2024  UTC (Universal Coordinated Time (UTC))"
        );
    }

    #[test]
    fn test_describe_side_unlisted_zone_uses_id() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let reading = WallClockTime::new(date, 9, 5, "Europe/Madrid").unwrap();
        let line = describe_side("From:", &reading, "%H:%M").unwrap();
        assert_eq!(line, "From: 09:05  Jan 5, 2024  Europe/Madrid (Europe/Madrid)");
    }
}
