//! Notification routes. Listing is scoped to the current user, newest first.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;

use super::{fetch, modify, remove};
use crate::commands::srv::error::{validated, ApiError, ApiJson, ApiPath};
use crate::commands::srv::state::AppState;
use crate::common::store::models::{NewNotification, Notification, NotificationPatch};
use crate::common::store::RecordId;

const KIND: &str = "Notification";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/notifications",
            get(list_notifications).post(create_notification),
        )
        .route(
            "/notifications/{id}",
            get(get_notification)
                .patch(update_notification)
                .delete(delete_notification),
        )
        .route("/notifications/{id}/read", patch(mark_read))
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let user_id = state.current_user();
    let mut notifications = state
        .store
        .notifications
        .list_by(&|n: &Notification| n.user_id == user_id)?;
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(Json(notifications))
}

async fn create_notification(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewNotification>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let payload = validated(payload)?;
    let notification = state
        .store
        .notifications
        .create(payload.into_record(state.current_user(), Utc::now()))?;
    Ok((StatusCode::CREATED, Json(notification)))
}

async fn get_notification(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<Notification>, ApiError> {
    Ok(Json(fetch(state.store.notifications.as_ref(), id, KIND)?))
}

async fn update_notification(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(patch): ApiJson<NotificationPatch>,
) -> Result<Json<Notification>, ApiError> {
    let patch = validated(patch)?;
    let notification = modify(state.store.notifications.as_ref(), id, KIND, |n| {
        Ok(patch.apply(n))
    })?;
    Ok(Json(notification))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<Notification>, ApiError> {
    let notification = modify(state.store.notifications.as_ref(), id, KIND, |n| {
        Ok(Notification { read: true, ..n })
    })?;
    Ok(Json(notification))
}

async fn delete_notification(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<StatusCode, ApiError> {
    remove(state.store.notifications.as_ref(), id, KIND)
}

#[cfg(test)]
mod tests {
    use crate::commands::srv::routes::testing::{seeded_app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    fn reminder(title: &str) -> serde_json::Value {
        json!({"title": title, "message": "Starts in 15 minutes", "type": "reminder"})
    }

    #[tokio::test]
    async fn test_create_and_mark_read() {
        let app = seeded_app();
        let (status, body) = send(&app, Method::POST, "/api/notifications", Some(reminder("Spanish"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["type"], "reminder");
        assert_eq!(body["read"], false);
        assert_eq!(body["userId"], 1);

        let (status, body) = send(&app, Method::PATCH, "/api/notifications/1/read", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["read"], true);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped() {
        let app = seeded_app();
        send(&app, Method::POST, "/api/notifications", Some(reminder("first"))).await;
        send(&app, Method::POST, "/api/notifications", Some(reminder("second"))).await;
        let mut other = reminder("not mine");
        other["userId"] = json!(7);
        send(&app, Method::POST, "/api/notifications", Some(other)).await;

        let (_, list) = send(&app, Method::GET, "/api/notifications", None).await;
        let titles: Vec<_> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_missing_type_rejected() {
        let (status, _) = send(
            &seeded_app(),
            Method::POST,
            "/api/notifications",
            Some(json!({"title": "x", "message": "y", "type": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mark_read_on_missing_is_404() {
        let (status, _) = send(&seeded_app(), Method::PATCH, "/api/notifications/5/read", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
