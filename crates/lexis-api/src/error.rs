//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"error": <code>, "message": <text>}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use lexis_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Request body or query string failed schema validation.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A natural-language query produced no filters.
  #[error("unparseable query: {0}")]
  Unparseable(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store failure: uniqueness violations become conflicts,
  /// anything else is internal.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    if e.is_duplicate() {
      ApiError::Conflict("string already exists".to_owned())
    } else {
      ApiError::Store(Box::new(e))
    }
  }

  fn status_and_code(&self) -> (StatusCode, &'static str) {
    match self {
      ApiError::Validation(_) => {
        (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
      }
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::Unparseable(_) => (StatusCode::BAD_REQUEST, "unparseable"),
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
      ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
      ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
  }
}

impl From<lexis_core::Error> for ApiError {
  fn from(e: lexis_core::Error) -> Self {
    use lexis_core::Error;
    match e {
      Error::EmptyValue => ApiError::Validation(e.to_string()),
      Error::InvalidRange { .. } | Error::InvalidPhrase(_) => {
        ApiError::BadRequest(e.to_string())
      }
      Error::Uninterpretable(_) => ApiError::Unparseable(e.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::Validation(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::Validation(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = self.status_and_code();
    let message = match &self {
      ApiError::Validation(m)
      | ApiError::BadRequest(m)
      | ApiError::Unparseable(m)
      | ApiError::NotFound(m)
      | ApiError::Conflict(m) => m.clone(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        "internal server error".to_owned()
      }
    };
    (status, Json(json!({ "error": code, "message": message }))).into_response()
  }
}
