//! # TzTalk Time Zone Detect Command
//!
//! File: cli/src/commands/tz/detect.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk tz detect`: prints the host zone when it is one of the
//! selectable zones, otherwise `UTC`. Never fails.
//!
use crate::common::timezone::catalog;
use crate::core::error::Result;
use clap::Parser;

/// # Detect Arguments (`DetectArgs`)
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Also print the zone's display label.
    #[arg(long, short)]
    pub label: bool,
}

/// # Handle Detect Command (`handle_detect`)
pub async fn handle_detect(args: DetectArgs) -> Result<()> {
    let zone = catalog::detect_time_zone();
    if args.label {
        println!("{} ({})", zone, catalog::label_for(zone));
    } else {
        println!("{}", zone);
    }
    Ok(())
}
