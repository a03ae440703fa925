//! Handlers for `/media` endpoints.
//!
//! Upload takes the raw image bytes as the request body with the MIME type
//! in `Content-Type`; an optional description rides in the query string.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use parish_core::store::DirectoryStore;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
  pub description: Option<String>,
}

/// `POST /media[?description=...]`
pub async fn upload<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<UploadParams>,
  headers: header::HeaderMap,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(|| {
      ApiError::BadRequest("missing Content-Type header".to_string())
    })?;

  let item = state
    .media
    .upload(content_type, &body, params.description)
    .await?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /media/:id` — the stored bytes, served with their original MIME type.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let (item, bytes) = state.media.fetch(id).await?;
  Ok(([(header::CONTENT_TYPE, item.content_type)], bytes))
}
