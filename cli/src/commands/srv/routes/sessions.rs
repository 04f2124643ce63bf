//! # Session Routes
//!
//! File: cli/src/commands/srv/routes/sessions.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Scheduling endpoints. A new session arrives as wall-clock input
//! (`date`, `startTime`, `endTime` in `userTimeZone`) and is stored as two
//! absolute UTC instants, so every client can render it in its own zone.
//!
//! ## Examples
//!
//! ```text
//! POST /api/sessions
//! { "title": "Spanish practice", "date": "2024-06-01", "startTime": "15:00",
//!   "endTime": "16:00", "languageId": 1, "userTimeZone": "America/Los_Angeles" }
//!
//! 201 { "id": 4, "startTime": "2024-06-01T22:00:00Z", "endTime": "2024-06-01T23:00:00Z",
//!       "status": "scheduled", ... }
//! ```
//!
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use super::{fetch, modify, remove};
use crate::commands::srv::error::{validated, ApiError, ApiJson, ApiPath};
use crate::commands::srv::state::AppState;
use crate::common::store::models::{ScheduleSessionRequest, Session, SessionPatch};
use crate::common::store::RecordId;

const KIND: &str = "Session";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(list_sessions).post(schedule_session))
        .route(
            "/sessions/{id}",
            get(get_session).patch(update_session).delete(delete_session),
        )
}

/// The current user's sessions, earliest first.
async fn list_sessions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Session>>, ApiError> {
    let user_id = state.current_user();
    let mut sessions = state
        .store
        .sessions
        .list_by(&|s: &Session| s.user_id == user_id)?;
    sessions.sort_by_key(|s| s.start_time);
    Ok(Json(sessions))
}

async fn schedule_session(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ScheduleSessionRequest>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    let (start, end) = request.resolve_times().map_err(ApiError::invalid)?;
    let zone = request.user_time_zone.clone();
    let session = state
        .store
        .sessions
        .create(request.into_record(state.current_user(), start, end))?;
    info!(
        "Scheduled session {} at {} ({} local)",
        session.id, session.start_time, zone
    );
    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<Session>, ApiError> {
    Ok(Json(fetch(state.store.sessions.as_ref(), id, KIND)?))
}

async fn update_session(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(patch): ApiJson<SessionPatch>,
) -> Result<Json<Session>, ApiError> {
    let patch = validated(patch)?;
    let session = modify(state.store.sessions.as_ref(), id, KIND, |session| {
        patch.apply(session).map_err(ApiError::invalid)
    })?;
    Ok(Json(session))
}

async fn delete_session(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<StatusCode, ApiError> {
    remove(state.store.sessions.as_ref(), id, KIND)
}
