//! # TzTalk API Errors
//!
//! File: cli/src/commands/srv/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every handler returns `Result<T, ApiError>`. `ApiError` implements
//! [`IntoResponse`] and renders the JSON error body the web client expects:
//!
//! ```json
//! { "message": "Invalid input", "errors": [{ "field": "title", "message": "..." }] }
//! ```
//!
//! | Variant      | Status | Body                                  |
//! |--------------|--------|---------------------------------------|
//! | `Validation` | 400    | message plus the field errors, if any |
//! | `NotFound`   | 404    | `"<Kind> not found"`                  |
//! | `Internal`   | 500    | `"internal server error"` only        |
//!
//! Internal details are logged and never sent to the caller.
//!
//! `ApiJson` and `ApiPath` wrap Axum's `Json` and `Path` extractors so that
//! malformed bodies and ids are reported in the same shape.
//!
use crate::common::store::models::{FieldError, Validate};
use crate::common::store::StoreError;
use crate::common::timezone::TimeZoneError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// All errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body, query or path was rejected.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A 400 carrying the given field errors.
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: "Invalid input".to_string(),
            errors,
        }
    }

    /// A 400 with a message and no field list.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn not_found(kind: &str) -> Self {
        Self::NotFound(kind.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Runs the payload's checks, turning any problems into a 400.
pub fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    let errors = payload.validate();
    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(ApiError::invalid(errors))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation { message, errors } => {
                warn!(%message, count = errors.len(), "rejected request");
                ErrorBody { message, errors }
            }
            ApiError::NotFound(kind) => ErrorBody {
                message: format!("{} not found", kind),
                errors: Vec::new(),
            },
            ApiError::Internal(detail) => {
                error!(%detail, "internal server error");
                ErrorBody {
                    message: "internal server error".to_string(),
                    errors: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<TimeZoneError> for ApiError {
    fn from(e: TimeZoneError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// JSON request body whose rejection is an [`ApiError`].
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters whose rejection is an [`ApiError`].
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_lists_field_errors() {
        let error = ApiError::invalid(vec![FieldError::new("title", "too short")]);
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input");
        assert_eq!(body["errors"][0]["field"], "title");
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let (status, body) = body_json(ApiError::not_found("Session")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Session not found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let error: ApiError = StoreError::Poisoned("users").into();
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[test]
    fn test_zone_errors_are_bad_requests() {
        let error: ApiError = TimeZoneError::UnknownZone("Mars/Base".into()).into();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().contains("Mars/Base"));
    }
}
