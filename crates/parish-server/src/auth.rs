//! Production implementations of the auth seams: argon2 password hashing
//! and HS256 JWT issuance.

use std::time::{SystemTime, UNIX_EPOCH};

use argon2::{
  Argon2,
  password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
  },
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use parish_core::{
  Error,
  auth::{PasswordHasher, TokenIssuer},
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

// ─── Argon2 ──────────────────────────────────────────────────────────────────

pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
  fn hash(&self, plaintext: &str) -> parish_core::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(plaintext.as_bytes(), &salt)
      .map(|h| h.to_string())
      .map_err(|e| Error::Auth(e.to_string()))
  }

  fn verify(&self, plaintext: &str, hash: &str) -> parish_core::Result<bool> {
    let parsed =
      PasswordHash::new(hash).map_err(|e| Error::Auth(e.to_string()))?;
    Ok(
      Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok(),
    )
  }
}

// ─── JWT ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  iat: u64,
  exp: u64,
}

/// Issues HS256-signed bearer tokens with the user's email as subject.
pub struct JwtIssuer {
  secret:         String,
  expiry_seconds: u64,
}

impl JwtIssuer {
  pub fn new(secret: String, expiry_seconds: u64) -> Self {
    Self { secret, expiry_seconds }
  }
}

impl TokenIssuer for JwtIssuer {
  fn issue(&self, subject: &str) -> parish_core::Result<String> {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map_err(|e| Error::Auth(e.to_string()))?
      .as_secs();

    let claims = Claims {
      sub: subject.to_string(),
      iat: now,
      exp: now + self.expiry_seconds,
    };

    jsonwebtoken::encode(
      &Header::default(),
      &claims,
      &EncodingKey::from_secret(self.secret.as_bytes()),
    )
    .map_err(|e| Error::Auth(e.to_string()))
  }

  fn decode(&self, token: &str) -> parish_core::Result<String> {
    jsonwebtoken::decode::<Claims>(
      token,
      &DecodingKey::from_secret(self.secret.as_bytes()),
      &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|e| Error::Auth(e.to_string()))
  }
}
