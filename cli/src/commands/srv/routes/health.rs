//! Health / heartbeat endpoint.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::commands::srv::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Returns `{"status": "ok", "version": "..."}` with HTTP 200.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use crate::commands::srv::routes::testing::{seeded_app, send};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health_reports_ok_and_version() {
        let (status, body) = send(&seeded_app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = send(&seeded_app(), Method::GET, "/api/nothing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
