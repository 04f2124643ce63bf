//! # TzTalk Time Zone Command Group
//!
//! File: cli/src/commands/tz/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the entry point and router for the `tztalk tz` command
//! group. Its subcommands drive the time zone converter from the terminal:
//! converting a clock time, showing the hour offset between two zones,
//! listing the selectable zones and detecting the host zone.
//!
//! ## Architecture
//!
//! - `TzArgs`: Top-level arguments for the command group.
//! - `TzCommand`: Enum defining all `tz` subcommands.
//! - `handle_tz`: Dispatches to the matching subcommand handler.
//!
//! Subcommands that need default zones read them from the `[profile]`
//! configuration section.
//!
//! ## Examples
//!
//! ```bash
//! # What time is 15:00 in Los Angeles for my partner in Paris?
//! tztalk tz convert 15:00 --from America/Los_Angeles --to Europe/Paris
//!
//! # How far ahead is Tokyo?
//! tztalk tz offset UTC Asia/Tokyo
//!
//! # List the selectable zones
//! tztalk tz zones
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Contains the handler and arguments for `tztalk tz convert`.
mod convert;
/// Contains the handler for `tztalk tz detect`.
mod detect;
/// Contains the handler and arguments for `tztalk tz offset`.
mod offset;
/// Contains the handler for `tztalk tz zones`.
mod zones;

/// # Time Zone Command Group Arguments (`TzArgs`)
#[derive(Parser, Debug)]
pub struct TzArgs {
    #[command(subcommand)]
    command: TzCommand,
}

/// # Time Zone Subcommands (`TzCommand`)
#[derive(Subcommand, Debug)]
enum TzCommand {
    /// Convert a wall-clock time from one zone to another.
    Convert(convert::ConvertArgs),
    /// Show the whole-hour offset between two zones right now.
    Offset(offset::OffsetArgs),
    /// List the selectable time zones.
    Zones(zones::ZonesArgs),
    /// Print the host's time zone (catalog zones only, otherwise UTC).
    Detect(detect::DetectArgs),
}

/// # Handle Time Zone Command (`handle_tz`)
///
/// Dispatches `tztalk tz <subcommand>` to its handler.
///
/// ## Arguments
///
/// * `args`: The parsed `TzArgs` holding the chosen subcommand.
///
/// ## Returns
///
/// * `Result<()>`: Propagates the subcommand handler's result.
pub async fn handle_tz(args: TzArgs) -> Result<()> {
    match args.command {
        TzCommand::Convert(args) => convert::handle_convert(args).await?,
        TzCommand::Offset(args) => offset::handle_offset(args).await?,
        TzCommand::Zones(args) => zones::handle_zones(args).await?,
        TzCommand::Detect(args) => detect::handle_detect(args).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tz_convert() {
        let result = TzArgs::try_parse_from([
            "tz", "convert", "15:00", "--from", "UTC", "--to", "Asia/Tokyo",
        ]);
        assert!(result.is_ok());
        match result.unwrap().command {
            TzCommand::Convert(args) => {
                assert_eq!(args.time, "15:00");
                assert_eq!(args.from.as_deref(), Some("UTC"));
                assert_eq!(args.to.as_deref(), Some("Asia/Tokyo"));
                assert!(args.date.is_none());
            }
            _ => panic!("Incorrect subcommand parsed for 'convert'"),
        }
    }

    #[test]
    fn test_parses_tz_offset_requires_two_zones() {
        assert!(TzArgs::try_parse_from(["tz", "offset", "UTC"]).is_err());
        let result = TzArgs::try_parse_from(["tz", "offset", "UTC", "Europe/Paris"]);
        match result.unwrap().command {
            TzCommand::Offset(args) => {
                assert_eq!(args.from, "UTC");
                assert_eq!(args.to, "Europe/Paris");
            }
            _ => panic!("Incorrect subcommand parsed for 'offset'"),
        }
    }

    #[test]
    fn test_parses_tz_zones_and_detect() {
        assert!(matches!(
            TzArgs::try_parse_from(["tz", "zones"]).unwrap().command,
            TzCommand::Zones(_)
        ));
        assert!(matches!(
            TzArgs::try_parse_from(["tz", "detect"]).unwrap().command,
            TzCommand::Detect(_)
        ));
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(TzArgs::try_parse_from(["tz", "teleport"]).is_err());
    }
}
