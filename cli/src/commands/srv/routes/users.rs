//! # User Routes
//!
//! File: cli/src/commands/srv/routes/users.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! User records plus the "current user" views the dashboard relies on. The
//! current user is `server.current_user_id` from the configuration; there
//! is no authentication.
//!
//! ```text
//! GET    /api/users             list
//! POST   /api/users             create (201)
//! GET    /api/users/current     configured current user
//! GET    /api/users/stats       dashboard counters
//! PATCH  /api/users/profile     update the current user
//! GET    /api/users/{id}
//! PATCH  /api/users/{id}
//! DELETE /api/users/{id}        204
//! ```
//!
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use tracing::info;

use super::{fetch, modify, remove};
use crate::commands::srv::error::{validated, ApiError, ApiJson, ApiPath};
use crate::commands::srv::state::AppState;
use crate::common::store::models::{Language, NewUser, Session, User, UserPatch, UserStats};
use crate::common::store::RecordId;

const KIND: &str = "User";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/current", get(current_user))
        .route("/users/stats", get(user_stats))
        .route("/users/profile", patch(update_profile))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.users.list()?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let payload = validated(payload)?;
    let user = state.store.users.create(payload.into_record(Utc::now()))?;
    info!("Created user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn current_user(State(state): State<Arc<AppState>>) -> Result<Json<User>, ApiError> {
    Ok(Json(fetch(state.store.users.as_ref(), state.current_user(), KIND)?))
}

async fn user_stats(State(state): State<Arc<AppState>>) -> Result<Json<UserStats>, ApiError> {
    let user_id = state.current_user();
    let sessions = state.store.sessions.list_by(&|s: &Session| s.user_id == user_id)?;
    let languages = state.store.languages.list_by(&|l: &Language| l.user_id == user_id)?;
    Ok(Json(UserStats::compute(user_id, &sessions, &languages)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    let patch = validated(patch)?;
    let user = modify(state.store.users.as_ref(), state.current_user(), KIND, |user| {
        Ok(patch.apply(user))
    })?;
    Ok(Json(user))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(fetch(state.store.users.as_ref(), id, KIND)?))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<User>, ApiError> {
    let patch = validated(patch)?;
    let user = modify(state.store.users.as_ref(), id, KIND, |user| Ok(patch.apply(user)))?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<StatusCode, ApiError> {
    remove(state.store.users.as_ref(), id, KIND)
}

#[cfg(test)]
mod tests {
    use crate::commands::srv::routes::testing::{seeded_app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_current_user_is_demo_user() {
        let (status, body) = send(&seeded_app(), Method::GET, "/api/users/current", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["timeZone"], "America/Los_Angeles");
    }

    #[tokio::test]
    async fn test_create_user_assigns_next_id_and_defaults() {
        let app = seeded_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"username": "sam", "name": "Sam Lee", "email": "sam@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 2);
        assert_eq!(body["timeZone"], "UTC");
        assert_eq!(body["plan"], "Free");

        let (_, list) = send(&app, Method::GET, "/api/users", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_reports_every_bad_field() {
        let (status, body) = send(
            &seeded_app(),
            Method::POST,
            "/api/users",
            Some(json!({"username": "", "name": "X", "email": "nope", "timeZone": "Mars/Base"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<_> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert!(fields.contains(&"username".to_string()));
        assert!(fields.contains(&"email".to_string()));
        assert!(fields.contains(&"timeZone".to_string()));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = send(
            &seeded_app(),
            Method::POST,
            "/api/users",
            Some(json!({"username": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_update_profile_changes_current_user() {
        let app = seeded_app();
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/users/profile",
            Some(json!({"timeZone": "Europe/Paris"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timeZone"], "Europe/Paris");
        assert_eq!(body["name"], "Alex Johnson");

        let (_, current) = send(&app, Method::GET, "/api/users/current", None).await;
        assert_eq!(current["timeZone"], "Europe/Paris");
    }

    #[tokio::test]
    async fn test_stats_count_scheduled_sessions_and_languages() {
        let (status, body) = send(&seeded_app(), Method::GET, "/api/users/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["upcomingSessions"], 3);
        assert_eq!(body["activeLanguages"], 3);
        assert_eq!(body["hoursPracticed"], 0.0);
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let app = seeded_app();
        let (status, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        let (status, _) = send(&app, Method::GET, "/api/users/current", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let (status, _) = send(&seeded_app(), Method::GET, "/api/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
