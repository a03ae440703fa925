//! Handlers for `/addresses` endpoints.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use parish_core::{
  address::{Address, NewAddress},
  store::DirectoryStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /addresses`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Address>>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.addresses.list().await?))
}

/// `POST /addresses`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewAddress>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let address = state.addresses.create(body).await?;
  Ok((StatusCode::CREATED, Json(address)))
}

/// `GET /addresses/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Address>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.addresses.get(id).await?))
}
