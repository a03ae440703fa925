//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | All people, fully hydrated |
//! | `POST` | `/people` | Body: [`NewPerson`]; 201 + created person |
//! | `GET`  | `/people/:id` | 404 if not found |
//! | `PUT`  | `/people/:id` | Body: [`PersonUpdate`] |
//! | `GET`  | `/people/:id/profile-image` | Raw image bytes, 404 if none |
//! | `POST` | `/people/:id/profile-image` | Raw body + `Content-Type` header |
//! | `GET`  | `/people/:id/profile-images` | Full image history as JSON |

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use parish_core::{
  media::MediaItem,
  person::{NewPerson, PersonUpdate, PersonView},
  store::DirectoryStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /people`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<PersonView>>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.people.list().await?))
}

/// Response for `POST /people`: the created person plus, when a login was
/// requested, what became of it.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
  #[serde(flatten)]
  pub person: PersonView,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub login_error: Option<String>,
}

/// `POST /people`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewPerson>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let created = state.people.create(body).await?;
  let login_error = match created.login {
    parish_core::service::LoginProvisioning::Failed(reason) => Some(reason),
    _ => None,
  };
  Ok((
    StatusCode::CREATED,
    Json(CreatedBody { person: created.person, login_error }),
  ))
}

/// `GET /people/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<PersonView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.people.get(id).await?))
}

/// `PUT /people/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PersonUpdate>,
) -> Result<Json<PersonView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.people.update(id, body).await?))
}

// ─── Profile images ──────────────────────────────────────────────────────────

/// `POST /people/:id/profile-image` — raw image bytes in the body.
pub async fn upload_profile_image<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
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
    .people
    .upload_profile_image(id, content_type, &body)
    .await?;
  Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /people/:id/profile-image` — the current image, as raw bytes.
pub async fn get_profile_image<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let (item, bytes) = state
    .people
    .profile_image(id)
    .await?
    .ok_or_else(|| {
      ApiError::NotFound(format!("person {id} has no profile image"))
    })?;
  Ok(([(header::CONTENT_TYPE, item.content_type)], bytes))
}

/// `GET /people/:id/profile-images` — image history metadata, newest first.
pub async fn list_profile_images<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<MediaItem>>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.people.profile_images(id).await?))
}
