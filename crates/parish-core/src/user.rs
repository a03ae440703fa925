//! User — a login record, optionally linked 1:1 to a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted user row. The password hash is never serialised outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:       Uuid,
  pub created_at:    DateTime<Utc>,
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub mobile_number: String,
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub person_id:     Option<Uuid>,
}

/// Payload for creating a user through the API. Carries the plaintext
/// password; hashing happens in the service before the store sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub mobile_number: String,
  pub password:      String,
  pub person_id:     Option<Uuid>,
}

/// Input to [`DirectoryStore::create_user`](crate::store::DirectoryStore) —
/// the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub mobile_number: String,
  pub password_hash: String,
  pub person_id:     Option<Uuid>,
}
