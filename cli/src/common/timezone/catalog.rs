//! # Zone Catalog (`common::timezone::catalog`)
//!
//! File: cli/src/common/timezone/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The fixed list of time zones a user can pick from, each paired with a
//! display label carrying its nominal UTC offset. Labels describe standard
//! time only; the live offset comes from the zone database.
//!
use serde::Serialize;
use tracing::{debug, warn};

/// Zone used whenever detection cannot produce a catalog entry.
pub const FALLBACK_ZONE: &str = "UTC";

/// One selectable zone: IANA identifier plus human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneEntry {
    pub id: &'static str,
    pub label: &'static str,
}

const fn zone(id: &'static str, label: &'static str) -> ZoneEntry {
    ZoneEntry { id, label }
}

/// Selectable zones, ordered west to east.
pub const TIME_ZONES: [ZoneEntry; 21] = [
    zone("Pacific/Honolulu", "Hawaii Standard Time (UTC-10:00)"),
    zone("America/Anchorage", "Alaska Standard Time (UTC-09:00)"),
    zone("America/Los_Angeles", "Pacific Time (UTC-08:00)"),
    zone("America/Denver", "Mountain Time (UTC-07:00)"),
    zone("America/Chicago", "Central Time (UTC-06:00)"),
    zone("America/New_York", "Eastern Time (UTC-05:00)"),
    zone("America/Halifax", "Atlantic Time (UTC-04:00)"),
    zone("America/Sao_Paulo", "Brasilia Time (UTC-03:00)"),
    zone("UTC", "Universal Coordinated Time (UTC)"),
    zone("Europe/London", "Greenwich Mean Time (UTC+00:00)"),
    zone("Europe/Paris", "Central European Time (UTC+01:00)"),
    zone("Europe/Helsinki", "Eastern European Time (UTC+02:00)"),
    zone("Europe/Moscow", "Moscow Time (UTC+03:00)"),
    zone("Asia/Dubai", "Gulf Standard Time (UTC+04:00)"),
    zone("Asia/Karachi", "Pakistan Standard Time (UTC+05:00)"),
    zone("Asia/Dhaka", "Bangladesh Standard Time (UTC+06:00)"),
    zone("Asia/Bangkok", "Indochina Time (UTC+07:00)"),
    zone("Asia/Shanghai", "China Standard Time (UTC+08:00)"),
    zone("Asia/Tokyo", "Japan Standard Time (UTC+09:00)"),
    zone("Australia/Sydney", "Australian Eastern Time (UTC+10:00)"),
    zone("Pacific/Auckland", "New Zealand Standard Time (UTC+12:00)"),
];

/// Looks up a catalog entry by its exact identifier.
pub fn find(id: &str) -> Option<&'static ZoneEntry> {
    TIME_ZONES.iter().find(|entry| entry.id == id)
}

/// Returns `true` when `id` is one of the selectable zones.
pub fn is_supported(id: &str) -> bool {
    find(id).is_some()
}

/// Display label for `id`, or the identifier itself when it is not in the catalog.
pub fn label_for(id: &str) -> &str {
    find(id).map(|entry| entry.label).unwrap_or(id)
}

/// # Detect Host Time Zone (`detect_time_zone`)
///
/// Reads the host's configured IANA zone and returns it if it is part of the
/// catalog. Any failure to read the host zone, or a zone outside the catalog,
/// degrades to [`FALLBACK_ZONE`] instead of an error.
pub fn detect_time_zone() -> &'static str {
    match iana_time_zone::get_timezone() {
        Ok(host_zone) => {
            debug!("Host reports time zone '{}'", host_zone);
            detect_from(Some(&host_zone))
        }
        Err(e) => {
            warn!("Could not read host time zone ({}), using {}", e, FALLBACK_ZONE);
            FALLBACK_ZONE
        }
    }
}

/// Catalog-restricted detection over an already obtained candidate.
pub fn detect_from(candidate: Option<&str>) -> &'static str {
    match candidate.and_then(find) {
        Some(entry) => entry.id,
        None => {
            debug!(
                "Zone {:?} is not in the catalog, falling back to {}",
                candidate, FALLBACK_ZONE
            );
            FALLBACK_ZONE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn test_catalog_entries_resolve() {
        // Every selectable zone must be known to the zone database.
        for entry in TIME_ZONES.iter() {
            assert!(
                entry.id.parse::<Tz>().is_ok(),
                "catalog zone {} does not resolve",
                entry.id
            );
        }
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = TIME_ZONES.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TIME_ZONES.len());
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(label_for("Asia/Tokyo"), "Japan Standard Time (UTC+09:00)");
        assert_eq!(label_for("Europe/Madrid"), "Europe/Madrid");
        assert!(is_supported("UTC"));
        assert!(!is_supported("utc"));
    }

    #[test]
    fn test_detect_from_candidate() {
        assert_eq!(detect_from(Some("Europe/Paris")), "Europe/Paris");
        // Valid IANA zone, but not selectable.
        assert_eq!(detect_from(Some("Europe/Madrid")), FALLBACK_ZONE);
        assert_eq!(detect_from(None), FALLBACK_ZONE);
    }

    #[test]
    fn test_detect_time_zone_is_in_catalog() {
        assert!(is_supported(detect_time_zone()));
    }
}
