//! # TzTalk Time Zone List Command
//!
//! File: cli/src/commands/tz/zones.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk tz zones`: prints every selectable zone with its label
//! and its current offset from UTC. `--ids` prints identifiers only, one per
//! line, for scripting.
//!
use crate::common::timezone::{catalog, convert};
use crate::core::error::Result;
use chrono::{DateTime, Utc};
use clap::Parser;

/// # Zones Arguments (`ZonesArgs`)
#[derive(Parser, Debug)]
pub struct ZonesArgs {
    /// Print zone identifiers only.
    #[arg(long)]
    pub ids: bool,
}

/// # Handle Zones Command (`handle_zones`)
pub async fn handle_zones(args: ZonesArgs) -> Result<()> {
    for line in render_zones(args.ids, Utc::now())? {
        println!("{}", line);
    }
    Ok(())
}

fn render_zones(ids_only: bool, now: DateTime<Utc>) -> Result<Vec<String>> {
    catalog::TIME_ZONES
        .iter()
        .map(|entry| {
            if ids_only {
                return Ok(entry.id.to_string());
            }
            let hours = convert::hour_offset_at(catalog::FALLBACK_ZONE, entry.id, now)?;
            Ok(format!(
                "{:<22} {:<40} {}",
                entry.id,
                entry.label,
                convert::describe_offset(hours)
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ids_only() {
        let lines = render_zones(true, Utc::now()).unwrap();
        assert_eq!(lines.len(), catalog::TIME_ZONES.len());
        assert_eq!(lines[0], "Pacific/Honolulu");
    }

    #[test]
    fn test_render_table_includes_live_offset() {
        let winter: DateTime<Utc> = "2024-01-15T12:00:00Z".parse().unwrap();
        let lines = render_zones(false, winter).unwrap();
        let tokyo = lines.iter().find(|l| l.starts_with("Asia/Tokyo")).unwrap();
        assert!(tokyo.contains("Japan Standard Time (UTC+09:00)"));
        assert!(tokyo.ends_with("+9 hours"));
        let utc = lines.iter().find(|l| l.starts_with("UTC ")).unwrap();
        assert!(utc.ends_with("same time"));
    }
}
