//! # Time Zone Routes
//!
//! File: cli/src/commands/srv/routes/timezones.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Exposes the converter over HTTP so the scheduling form can preview a
//! partner's local time without duplicating zone rules in the browser.
//!
//! ```text
//! GET  /api/timezones                          zone catalog
//! GET  /api/timezones/offset?from=UTC&to=Asia/Tokyo
//!      { "from": "UTC", "to": "Asia/Tokyo", "hours": 9, "description": "+9 hours" }
//! POST /api/timezones/convert
//!      { "date": "2024-06-01", "time": "15:00",
//!        "fromZone": "America/Los_Angeles", "toZone": "Europe/Paris" }
//!      { "date": "2024-06-02", "time": "00:00", "zone": "Europe/Paris",
//!        "label": "Central European Time (UTC+01:00)", "formatted": "12:00 AM",
//!        "offsetHours": 9 }
//! ```
//!
use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::commands::srv::error::{ApiError, ApiJson};
use crate::commands::srv::state::AppState;
use crate::common::store::models::FieldError;
use crate::common::timezone::catalog::{self, ZoneEntry, TIME_ZONES};
use crate::common::timezone::convert::{self, DEFAULT_DISPLAY_PATTERN};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/timezones", get(list_zones))
        .route("/timezones/offset", get(offset))
        .route("/timezones/convert", post(convert_time))
}

#[derive(Debug, Deserialize)]
struct OffsetQuery {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Serialize)]
struct OffsetResponse {
    from: String,
    to: String,
    hours: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest {
    date: String,
    time: String,
    from_zone: String,
    to_zone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertResponse {
    date: String,
    time: String,
    zone: String,
    label: String,
    formatted: String,
    offset_hours: i64,
}

async fn list_zones() -> Json<Vec<ZoneEntry>> {
    Json(TIME_ZONES.to_vec())
}

async fn offset(Query(query): Query<OffsetQuery>) -> Result<Json<OffsetResponse>, ApiError> {
    let mut errors = Vec::new();
    if query.from.is_none() {
        errors.push(FieldError::new("from", "is required"));
    }
    if query.to.is_none() {
        errors.push(FieldError::new("to", "is required"));
    }
    let (Some(from), Some(to)) = (query.from, query.to) else {
        return Err(ApiError::invalid(errors));
    };

    let hours = convert::hour_offset(&from, &to)?;
    Ok(Json(OffsetResponse {
        description: convert::describe_offset(hours),
        from,
        to,
        hours,
    }))
}

async fn convert_time(
    ApiJson(request): ApiJson<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let mut errors = Vec::new();
    let date = convert::parse_date(&request.date)
        .map_err(|e| errors.push(FieldError::new("date", e.to_string())))
        .ok();
    let time = convert::parse_clock(&request.time)
        .map_err(|e| errors.push(FieldError::new("time", e.to_string())))
        .ok();
    for (field, zone) in [("fromZone", &request.from_zone), ("toZone", &request.to_zone)] {
        if let Err(e) = convert::resolve_zone(zone) {
            errors.push(FieldError::new(field, e.to_string()));
        }
    }
    let (Some(date), Some(time), true) = (date, time, errors.is_empty()) else {
        return Err(ApiError::invalid(errors));
    };

    let local = date.and_time(time);
    let instant = convert::to_instant(local, &request.from_zone)?;
    let converted = convert::convert(local, &request.from_zone, &request.to_zone)?;
    let offset_hours = convert::hour_offset_at(&request.from_zone, &request.to_zone, instant)?;

    Ok(Json(ConvertResponse {
        date: converted.date().format("%Y-%m-%d").to_string(),
        time: converted.local().format("%H:%M").to_string(),
        label: catalog::label_for(&request.to_zone).to_string(),
        formatted: converted.format(DEFAULT_DISPLAY_PATTERN)?,
        zone: request.to_zone,
        offset_hours,
    }))
}
