//! JSON REST API for the parish member directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`parish_core::store::DirectoryStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", parish_api::api_router(state.clone()))
//! ```

pub mod addresses;
pub mod error;
pub mod households;
pub mod media;
pub mod people;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use parish_core::{
  auth::{PasswordHasher, TokenIssuer},
  media::{MediaStorage, StorageBackend},
  service::{
    AddressService, AuthService, HouseholdService, MediaService,
    PeopleService, UserService,
  },
  store::DirectoryStore,
};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub people:     PeopleService<S>,
  pub households: HouseholdService<S>,
  pub addresses:  AddressService<S>,
  pub media:      MediaService<S>,
  pub users:      UserService<S>,
  pub auth:       AuthService<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      people:     self.people.clone(),
      households: self.households.clone(),
      addresses:  self.addresses.clone(),
      media:      self.media.clone(),
      users:      self.users.clone(),
      auth:       self.auth.clone(),
    }
  }
}

impl<S> AppState<S>
where
  S: DirectoryStore,
{
  /// Wire up every service over one store and one set of collaborators.
  pub fn new(
    store: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    storage: Arc<dyn MediaStorage>,
    backend: StorageBackend,
  ) -> Self {
    let media = MediaService::new(store.clone(), storage, backend);
    let users = UserService::new(store.clone(), hasher.clone());
    let people = PeopleService::new(store.clone(), media.clone(), users.clone());
    let households = HouseholdService::new(store.clone());
    let addresses = AddressService::new(store.clone());
    let auth = AuthService::new(store, hasher, tokens);

    Self { people, households, addresses, media, users, auth }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: DirectoryStore + 'static,
{
  Router::new()
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>).put(people::update_one::<S>),
    )
    .route(
      "/people/{id}/profile-image",
      get(people::get_profile_image::<S>)
        .post(people::upload_profile_image::<S>),
    )
    .route(
      "/people/{id}/profile-images",
      get(people::list_profile_images::<S>),
    )
    // Households
    .route(
      "/households",
      get(households::list::<S>).post(households::create::<S>),
    )
    .route(
      "/households/{id}",
      get(households::get_one::<S>).put(households::update_one::<S>),
    )
    // Addresses
    .route(
      "/addresses",
      get(addresses::list::<S>).post(addresses::create::<S>),
    )
    .route("/addresses/{id}", get(addresses::get_one::<S>))
    // Media
    .route("/media", post(media::upload::<S>))
    .route("/media/{id}", get(media::get_one::<S>))
    // Users and auth
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/login", post(users::login::<S>))
    .route("/me", get(users::me::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
