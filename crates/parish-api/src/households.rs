//! Handlers for `/households` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/households` | All households, fully hydrated |
//! | `POST` | `/households` | Body: [`NewHousehold`]; 201 + created view |
//! | `GET`  | `/households/:id` | 404 if not found |
//! | `PUT`  | `/households/:id` | Body: [`HouseholdUpdate`]; absent fields unchanged |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use parish_core::{
  household::{HouseholdUpdate, HouseholdView, NewHousehold},
  store::DirectoryStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// `GET /households`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<HouseholdView>>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.households.list().await?))
}

/// `POST /households`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewHousehold>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DirectoryStore + 'static,
{
  let view = state.households.create(body).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /households/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<HouseholdView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.households.get(id).await?))
}

/// `PUT /households/:id`
pub async fn update_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<HouseholdUpdate>,
) -> Result<Json<HouseholdView>, ApiError>
where
  S: DirectoryStore + 'static,
{
  Ok(Json(state.households.update(id, body).await?))
}
