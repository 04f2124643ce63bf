//! # TzTalk API Routes
//!
//! File: cli/src/commands/srv/routes/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Assembles the HTTP surface of `tztalk srv`. `/health` sits at the root;
//! every data route lives under `/api`:
//!
//! | Prefix                 | Module          |
//! |------------------------|-----------------|
//! | `/api/users`           | `users`         |
//! | `/api/languages`       | `languages`     |
//! | `/api/sessions`        | `sessions`      |
//! | `/api/chatbot`         | `chatbot`       |
//! | `/api/notifications`   | `notifications` |
//! | `/api/timezones`       | `timezones`     |
//!
//! The fetch / patch / delete helpers below give every `{id}` route the same
//! 404 behavior.
//!
use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;

use super::error::ApiError;
use super::state::AppState;
use crate::common::store::{Record, RecordId, Repository};

pub mod chatbot;
pub mod health;
pub mod languages;
pub mod notifications;
pub mod sessions;
pub mod timezones;
pub mod users;

/// All routes, ready for `with_state`.
pub fn router() -> Router<Arc<AppState>> {
    let api = Router::new()
        .merge(users::router())
        .merge(languages::router())
        .merge(sessions::router())
        .merge(chatbot::router())
        .merge(notifications::router())
        .merge(timezones::router());

    Router::new().merge(health::router()).nest("/api", api)
}

/// The record at `id`, or a 404 naming `kind`.
fn fetch<T: Record>(repo: &dyn Repository<T>, id: RecordId, kind: &str) -> Result<T, ApiError> {
    repo.get(id)?.ok_or_else(|| ApiError::not_found(kind))
}

/// Loads the record at `id`, lets `change` rewrite it and stores the result.
fn modify<T, F>(repo: &dyn Repository<T>, id: RecordId, kind: &str, change: F) -> Result<T, ApiError>
where
    T: Record,
    F: FnOnce(T) -> Result<T, ApiError>,
{
    let updated = change(fetch(repo, id, kind)?)?;
    repo.update(id, updated)?
        .ok_or_else(|| ApiError::not_found(kind))
}

fn remove<T: Record>(repo: &dyn Repository<T>, id: RecordId, kind: &str) -> Result<StatusCode, ApiError> {
    if repo.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(kind))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Request helpers shared by the route tests.

    use super::*;
    use crate::commands::srv::config::ServerConfig;
    use crate::common::store::seed;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use chrono::Utc;
    use serde_json::Value;
    use tower::ServiceExt;

    /// The full router over freshly seeded demo data.
    pub fn seeded_app() -> Router {
        let store = seed::seeded_store(Utc::now()).unwrap();
        router().with_state(Arc::new(AppState::new(ServerConfig::default(), store)))
    }

    /// Sends one request and returns the status and JSON body (`Null` when empty).
    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
