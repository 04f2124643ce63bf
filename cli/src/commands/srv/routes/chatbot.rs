//! # Chatbot Routes
//!
//! File: cli/src/commands/srv/routes/chatbot.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! CRUD over the stored FAQ catalog, plus `POST /api/chatbot/query`, which
//! runs the keyword matcher against whatever the catalog holds at that moment.
//! Edits made through this API are picked up by the next query. Unmatched
//! queries get a fallback reply from the picker held in `AppState`.
//!
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;

use super::{fetch, modify, remove};
use crate::commands::srv::error::{validated, ApiError, ApiJson, ApiPath};
use crate::commands::srv::state::AppState;
use crate::common::chatbot::matcher::{self, FallbackPicker};
use crate::common::chatbot::ChatbotEntry;
use crate::common::store::models::{ChatbotQuery, ChatbotQuestion, ChatbotQuestionPatch};
use crate::common::store::RecordId;

const KIND: &str = "Chatbot question";

#[derive(Debug, Serialize)]
struct ChatbotAnswer {
    answer: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chatbot/questions", get(list_questions).post(create_question))
        .route(
            "/chatbot/questions/{id}",
            get(get_question).patch(update_question).delete(delete_question),
        )
        .route("/chatbot/query", post(query))
}

async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatbotQuestion>>, ApiError> {
    Ok(Json(state.store.chatbot.list()?))
}

async fn create_question(
    State(state): State<Arc<AppState>>,
    ApiJson(entry): ApiJson<ChatbotEntry>,
) -> Result<(StatusCode, Json<ChatbotQuestion>), ApiError> {
    let entry = validated(entry)?;
    let question = state.store.chatbot.create(ChatbotQuestion { id: 0, entry })?;
    Ok((StatusCode::CREATED, Json(question)))
}

async fn get_question(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<ChatbotQuestion>, ApiError> {
    Ok(Json(fetch(state.store.chatbot.as_ref(), id, KIND)?))
}

async fn update_question(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(patch): ApiJson<ChatbotQuestionPatch>,
) -> Result<Json<ChatbotQuestion>, ApiError> {
    let patch = validated(patch)?;
    let question = modify(state.store.chatbot.as_ref(), id, KIND, |question| {
        Ok(patch.apply(question))
    })?;
    Ok(Json(question))
}

async fn delete_question(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<StatusCode, ApiError> {
    remove(state.store.chatbot.as_ref(), id, KIND)
}

async fn query(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ChatbotQuery>,
) -> Result<Json<ChatbotAnswer>, ApiError> {
    if body.query.is_empty() {
        return Err(ApiError::bad_request("Invalid query"));
    }
    let questions = state.store.chatbot.list()?;
    let mut picker = state
        .picker
        .lock()
        .map_err(|_| ApiError::Internal("fallback picker lock poisoned".to_string()))?;
    let answer = answer_query(&body.query, &questions, &mut *picker);
    debug!("Chatbot query {:?} answered", body.query);
    Ok(Json(ChatbotAnswer { answer }))
}

/// Matches `query` against the stored entries. Synchronous so the picker
/// lock is never held across an await point.
fn answer_query(
    query: &str,
    questions: &[ChatbotQuestion],
    picker: &mut impl FallbackPicker,
) -> String {
    match matcher::find_best_match(query, questions.iter().map(|q| &q.entry)) {
        Some(entry) => entry.answer.clone(),
        None => matcher::fallback_response(picker).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::srv::config::ServerConfig;
    use crate::commands::srv::routes::testing::{seeded_app, send};
    use crate::commands::srv::routes::router;
    use crate::common::chatbot::catalog::FALLBACK_RESPONSES;
    use crate::common::chatbot::matcher::RandomPicker;
    use crate::common::store::seed;
    use axum::http::Method;
    use chrono::Utc;
    use serde_json::json;

    /// Always picks the same fallback slot.
    struct FixedPicker(usize);

    impl FallbackPicker for FixedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn app_with_picker(picker: impl FallbackPicker + Send + 'static) -> Router {
        let store = seed::seeded_store(Utc::now()).unwrap();
        router().with_state(Arc::new(AppState::with_picker(
            ServerConfig::default(),
            store,
            picker,
        )))
    }

    #[test]
    fn test_answer_query_uses_stored_entries() {
        let questions = seed::demo_questions();
        let mut picker = FixedPicker(2);
        let answer = answer_query("How do I change my time zone?", &questions, &mut picker);
        assert!(answer.contains("Settings > Preferences > Time Zone"));
        assert_eq!(answer_query("asdf qwer", &questions, &mut picker), FALLBACK_RESPONSES[2]);
    }

    #[tokio::test]
    async fn test_unmatched_query_uses_injected_picker() {
        let app = app_with_picker(FixedPicker(4));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chatbot/query",
            Some(json!({"query": "asdf qwer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], FALLBACK_RESPONSES[4]);
    }

    #[tokio::test]
    async fn test_seeded_pickers_answer_alike() {
        let first = app_with_picker(RandomPicker::seeded(11));
        let second = app_with_picker(RandomPicker::seeded(11));
        for _ in 0..5 {
            let query = Some(json!({"query": "zzz"}));
            let (_, a) = send(&first, Method::POST, "/api/chatbot/query", query.clone()).await;
            let (_, b) = send(&second, Method::POST, "/api/chatbot/query", query).await;
            assert_eq!(a, b);
        }
    }

    #[tokio::test]
    async fn test_empty_query_is_bad_request() {
        let (status, body) = send(
            &seeded_app(),
            Method::POST,
            "/api/chatbot/query",
            Some(json!({"query": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid query");
    }

    #[tokio::test]
    async fn test_query_cancellation() {
        let (status, body) = send(
            &seeded_app(),
            Method::POST,
            "/api/chatbot/query",
            Some(json!({"query": "I want to cancel my session tomorrow"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["answer"].as_str().unwrap().starts_with("To cancel a session"));
    }

    #[tokio::test]
    async fn test_query_without_text_is_bad_request() {
        let (status, _) = send(&seeded_app(), Method::POST, "/api/chatbot/query", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_new_question_is_matched() {
        let app = seeded_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chatbot/questions",
            Some(json!({
                "question": "Do you offer refunds?",
                "answer": "Refunds are available within 14 days.",
                "keywords": ["refund", "money back"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 9);

        let (_, reply) = send(
            &app,
            Method::POST,
            "/api/chatbot/query",
            Some(json!({"query": "can I get a refund?"})),
        )
        .await;
        assert_eq!(reply["answer"], "Refunds are available within 14 days.");
    }

    #[tokio::test]
    async fn test_question_requires_keywords() {
        let (status, body) = send(
            &seeded_app(),
            Method::POST,
            "/api/chatbot/questions",
            Some(json!({"question": "Q?", "answer": "A", "keywords": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "keywords");
    }

    #[tokio::test]
    async fn test_list_patch_and_delete_questions() {
        let app = seeded_app();
        let (_, list) = send(&app, Method::GET, "/api/chatbot/questions", None).await;
        assert_eq!(list.as_array().unwrap().len(), 8);
        assert!(list[0]["keywords"].is_array());

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/chatbot/questions/1",
            Some(json!({"answer": "Changed."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Changed.");

        let (status, _) = send(&app, Method::DELETE, "/api/chatbot/questions/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, Method::GET, "/api/chatbot/questions/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Chatbot question not found");
    }
}
