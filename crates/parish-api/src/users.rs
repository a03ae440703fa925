//! Handlers for `/users`, `/login`, and `/me`.
//!
//! `/login` exchanges credentials for a bearer token; `/me` resolves that
//! token back to its user. Everything else on the router is left open for
//! the deployment to protect as it sees fit.

use axum::{
  Json,
  extract::{Path, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use parish_core::{
  auth::AuthResponse,
  store::DirectoryStore,
  user::{NewUser, User},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /users`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.users.list().await?))
}

/// `POST /users`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let user = state.users.create(body).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.users.get(id).await?))
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

/// `POST /login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.auth.login(&body.email, &body.password).await?))
}

/// `GET /me` — requires `Authorization: Bearer <token>`.
pub async fn me<S>(
  State(state): State<AppState<S>>,
  headers: header::HeaderMap,
) -> Result<Json<User>, ApiError>
where
  S: DirectoryStore + 'static,
{
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .ok_or_else(|| {
      ApiError::Unauthorized("missing bearer token".to_string())
    })?;

  Ok(Json(state.auth.authenticated_user(token).await?))
}
