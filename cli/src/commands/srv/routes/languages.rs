//! Language routes: the current user's languages and per-id CRUD.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{fetch, modify, remove};
use crate::commands::srv::error::{validated, ApiError, ApiJson, ApiPath};
use crate::commands::srv::state::AppState;
use crate::common::store::models::{Language, LanguagePatch, NewLanguage};
use crate::common::store::RecordId;

const KIND: &str = "Language";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/languages", get(list_languages).post(create_language))
        .route(
            "/languages/{id}",
            get(get_language).patch(update_language).delete(delete_language),
        )
}

async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Language>>, ApiError> {
    let user_id = state.current_user();
    let languages = state
        .store
        .languages
        .list_by(&|l: &Language| l.user_id == user_id)?;
    Ok(Json(languages))
}

async fn create_language(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewLanguage>,
) -> Result<(StatusCode, Json<Language>), ApiError> {
    let payload = validated(payload)?;
    let language = state
        .store
        .languages
        .create(payload.into_record(state.current_user()))?;
    Ok((StatusCode::CREATED, Json(language)))
}

async fn get_language(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<Language>, ApiError> {
    Ok(Json(fetch(state.store.languages.as_ref(), id, KIND)?))
}

async fn update_language(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(patch): ApiJson<LanguagePatch>,
) -> Result<Json<Language>, ApiError> {
    let patch = validated(patch)?;
    let language = modify(state.store.languages.as_ref(), id, KIND, |language| {
        Ok(patch.apply(language))
    })?;
    Ok(Json(language))
}

async fn delete_language(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<StatusCode, ApiError> {
    remove(state.store.languages.as_ref(), id, KIND)
}
