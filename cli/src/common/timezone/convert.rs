//! # Zone Conversion (`common::timezone::convert`)
//!
//! File: cli/src/common/timezone/convert.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Converts wall-clock readings between zones, renders absolute instants for
//! display, and computes the whole-hour distance between two zones.
//!
//! ## Architecture
//!
//! Conversion always goes through an absolute UTC instant:
//! 1. Interpret the wall-clock reading in the source zone (`to_instant`)
//! 2. Re-render that instant in the target zone (`WallClockTime::from_instant`)
//!
//! Offset arithmetic is kept separate from its rendering: `hour_offset_at`
//! produces a signed integer and `describe_offset` turns it into text.
//!
//! Local times that fall in a DST overlap resolve to the earlier instant.
//! Local times inside a DST gap are moved forward by one hour.
//!
use super::TimeZoneError;
use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, trace};

/// Default display pattern: 12-hour clock with AM/PM (`3:00 PM`).
pub const DEFAULT_DISPLAY_PATTERN: &str = "%-I:%M %p";
/// Pattern for dates that are neither today nor tomorrow (`Jun 1, 2024`).
pub const DATE_LABEL_PATTERN: &str = "%b %-d, %Y";
/// Calendar years accepted for wall-clock input.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// A date plus hour/minute, read as local time in a specific zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockTime {
    local: NaiveDateTime,
    zone: Tz,
}

impl WallClockTime {
    /// Builds a reading from its parts. Fails if the zone is unknown or the
    /// hour/minute pair is out of range.
    pub fn new(date: NaiveDate, hour: u32, minute: u32, zone: &str) -> Result<Self, TimeZoneError> {
        let zone = resolve_zone(zone)?;
        let date = check_year(date)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeZoneError::InvalidClock(format!("{:02}:{:02}", hour, minute)))?;
        Ok(Self {
            local: date.and_time(time),
            zone,
        })
    }

    /// The wall-clock reading of `instant` in `zone`.
    pub fn from_instant(instant: DateTime<Utc>, zone: Tz) -> Self {
        Self {
            local: instant.with_timezone(&zone).naive_local(),
            zone,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The absolute instant this reading denotes.
    pub fn to_instant(&self) -> Result<DateTime<Utc>, TimeZoneError> {
        localize(self.zone, self.local)
    }

    /// The same instant read in another zone.
    pub fn in_zone(&self, target: Tz) -> Result<Self, TimeZoneError> {
        Ok(Self::from_instant(self.to_instant()?, target))
    }

    /// Renders the local reading with a strftime pattern.
    pub fn format(&self, pattern: &str) -> Result<String, TimeZoneError> {
        validate_pattern(pattern)?;
        Ok(self.local.format(pattern).to_string())
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.local.format("%Y-%m-%d %H:%M"),
            self.zone.name()
        )
    }
}

/// Resolves an IANA identifier against the zone database.
pub fn resolve_zone(id: &str) -> Result<Tz, TimeZoneError> {
    id.parse::<Tz>()
        .map_err(|_| TimeZoneError::UnknownZone(id.to_string()))
}

/// Parses an `HH:MM` clock reading.
pub fn parse_clock(input: &str) -> Result<NaiveTime, TimeZoneError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| TimeZoneError::InvalidClock(input.to_string()))
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, TimeZoneError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
        .ok_or_else(|| TimeZoneError::InvalidDate(input.to_string()))
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` clock into a naive local time.
pub fn parse_local(date: &str, clock: &str) -> Result<NaiveDateTime, TimeZoneError> {
    Ok(parse_date(date)?.and_time(parse_clock(clock)?))
}

/// # Local Time to Instant (`to_instant`)
///
/// Interprets `local` as a wall-clock reading in `zone` and returns the
/// absolute instant it denotes. Session scheduling stores these instants.
pub fn to_instant(local: NaiveDateTime, zone: &str) -> Result<DateTime<Utc>, TimeZoneError> {
    localize(resolve_zone(zone)?, local)
}

/// # Convert Between Zones (`convert`)
///
/// Interprets `local` in `from_zone`, then re-renders the resulting instant
/// as wall-clock time in `to_zone`. Unknown zones are returned as errors.
pub fn convert(
    local: NaiveDateTime,
    from_zone: &str,
    to_zone: &str,
) -> Result<WallClockTime, TimeZoneError> {
    let source = resolve_zone(from_zone)?;
    let target = resolve_zone(to_zone)?;
    let instant = localize(source, local)?;
    let converted = WallClockTime::from_instant(instant, target);
    debug!(
        "Converted {} {} -> {}",
        local,
        source.name(),
        converted
    );
    Ok(converted)
}

/// # Format Instant in Zone (`format_with_zone`)
///
/// Renders `instant` as wall-clock text in `zone`. `pattern` is a strftime
/// pattern; `None` uses [`DEFAULT_DISPLAY_PATTERN`].
pub fn format_with_zone(
    instant: DateTime<Utc>,
    zone: &str,
    pattern: Option<&str>,
) -> Result<String, TimeZoneError> {
    let pattern = pattern.unwrap_or(DEFAULT_DISPLAY_PATTERN);
    validate_pattern(pattern)?;
    let tz = resolve_zone(zone)?;
    Ok(instant.with_timezone(&tz).format(pattern).to_string())
}

/// Signed whole-hour offset from `zone_a` to `zone_b` right now.
pub fn hour_offset(zone_a: &str, zone_b: &str) -> Result<i64, TimeZoneError> {
    hour_offset_at(zone_a, zone_b, Utc::now())
}

/// # Hour Offset at Instant (`hour_offset_at`)
///
/// Renders `at` as local wall-clock in both zones and returns the difference
/// `b - a` rounded to the nearest whole hour (halves round away from zero).
/// The result depends on `at` because DST rules differ between zones, and
/// fractional-hour zones lose their minutes.
pub fn hour_offset_at(zone_a: &str, zone_b: &str, at: DateTime<Utc>) -> Result<i64, TimeZoneError> {
    let tz_a = resolve_zone(zone_a)?;
    let tz_b = resolve_zone(zone_b)?;
    let local_a = at.with_timezone(&tz_a).naive_local();
    let local_b = at.with_timezone(&tz_b).naive_local();
    let minutes = (local_b - local_a).num_minutes();
    let hours = (minutes as f64 / 60.0).round() as i64;
    trace!("Offset {} -> {} at {}: {} min ~ {} h", zone_a, zone_b, at, minutes, hours);
    Ok(hours)
}

/// Human-readable form of an hour offset: `same time`, `+N hours`, `-N hours`.
pub fn describe_offset(hour_diff: i64) -> String {
    match hour_diff {
        0 => "same time".to_string(),
        n if n > 0 => format!("+{} hours", n),
        n => format!("{} hours", n),
    }
}

/// `3:00 PM - 4:00 PM` style range in `zone`.
pub fn time_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &str,
) -> Result<String, TimeZoneError> {
    Ok(format!(
        "{} - {}",
        format_with_zone(start, zone, None)?,
        format_with_zone(end, zone, None)?
    ))
}

/// `Today`, `Tomorrow`, or a short date, judged by calendar days in `zone`.
pub fn relative_day_label(
    instant: DateTime<Utc>,
    now: DateTime<Utc>,
    zone: &str,
) -> Result<String, TimeZoneError> {
    let tz = resolve_zone(zone)?;
    let day = instant.with_timezone(&tz).date_naive();
    let today = now.with_timezone(&tz).date_naive();

    if day == today {
        Ok("Today".to_string())
    } else if Some(day) == today.succ_opt() {
        Ok("Tomorrow".to_string())
    } else {
        Ok(day.format(DATE_LABEL_PATTERN).to_string())
    }
}

/// Checks that a strftime pattern contains no unsupported specifiers.
pub fn validate_pattern(pattern: &str) -> Result<(), TimeZoneError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(TimeZoneError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}

fn check_year(date: NaiveDate) -> Result<NaiveDate, TimeZoneError> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(TimeZoneError::InvalidDate(date.to_string()))
    }
}

fn localize(zone: Tz, local: NaiveDateTime) -> Result<DateTime<Utc>, TimeZoneError> {
    check_year(local.date())?;
    let resolved = match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // Spring-forward gap.
        LocalResult::None => local
            .checked_add_signed(TimeDelta::hours(1))
            .and_then(|shifted| zone.from_local_datetime(&shifted).earliest()),
    };

    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimeZoneError::NonexistentLocalTime {
            local: local.to_string(),
            zone: zone.name().to_string(),
        })
}
