//! Authentication seams — password hashing and token issuance.
//!
//! Both are consumed as black-box collaborators behind object-safe traits;
//! the server binary wires the argon2 and JWT implementations in at
//! startup.

use serde::{Deserialize, Serialize};

use crate::{person::Person, user::User, Result};

/// Hashes and verifies passwords. Implementations must be safe to share
/// across request handlers.
pub trait PasswordHasher: Send + Sync {
  fn hash(&self, plaintext: &str) -> Result<String>;
  fn verify(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

/// Issues and decodes signed bearer tokens. The subject is the user's
/// email address.
pub trait TokenIssuer: Send + Sync {
  fn issue(&self, subject: &str) -> Result<String>;
  fn decode(&self, token: &str) -> Result<String>;
}

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
  pub access_token: String,
  pub token_type:   String,
  pub user:         User,
  /// The person linked to this login, if any.
  pub person:       Option<Person>,
}
