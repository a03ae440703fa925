//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use parish_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<CoreError> for ApiError {
  fn from(e: CoreError) -> Self {
    match e {
      CoreError::PersonNotFound(_)
      | CoreError::HouseholdNotFound(_)
      | CoreError::AddressNotFound(_)
      | CoreError::ImageNotFound(_)
      | CoreError::UserNotFound(_) => ApiError::NotFound(e.to_string()),

      CoreError::CannotRemoveLeader { .. }
      | CoreError::LeaderNotMember { .. }
      | CoreError::HouseholdHasNoMembers
      | CoreError::UserExists(_)
      | CoreError::UnsupportedMediaType(_) => {
        ApiError::BadRequest(e.to_string())
      }

      CoreError::InvalidCredentials | CoreError::Auth(_) => {
        ApiError::Unauthorized(e.to_string())
      }

      CoreError::Storage(_) | CoreError::Store(_) => {
        ApiError::Internal(e.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
