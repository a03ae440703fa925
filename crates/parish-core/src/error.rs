//! Error types for `parish-core`.
//!
//! Every validation failure is a distinct, named condition carrying the
//! offending id(s); backend failures are wrapped in [`Error::Store`].

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("household not found: {0}")]
  HouseholdNotFound(Uuid),

  #[error("address not found: {0}")]
  AddressNotFound(Uuid),

  #[error("image not found: {0}")]
  ImageNotFound(Uuid),

  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error(
    "cannot remove leader {person} from household {household}: assign a new \
     leader first"
  )]
  CannotRemoveLeader { person: Uuid, household: Uuid },

  #[error("designated leader {person} is not in the member list")]
  LeaderNotMember { person: Uuid },

  #[error("a household must have at least one member")]
  HouseholdHasNoMembers,

  #[error("a user already exists with email {0}")]
  UserExists(String),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("unsupported media type: {0}")]
  UnsupportedMediaType(String),

  #[error("auth error: {0}")]
  Auth(String),

  #[error("storage error: {0}")]
  Storage(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error from a
  /// [`DirectoryStore`](crate::store::DirectoryStore) implementation.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
