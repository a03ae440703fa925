//! [`UserService`] and [`AuthService`] — login records and token-based
//! authentication.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  auth::{AuthResponse, PasswordHasher, TokenIssuer},
  person::Person,
  store::DirectoryStore,
  user::{NewUser, NewUserRecord, User},
  Error, Result,
};

// ─── UserService ─────────────────────────────────────────────────────────────

pub struct UserService<S> {
  store:  Arc<S>,
  hasher: Arc<dyn PasswordHasher>,
}

impl<S> Clone for UserService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), hasher: self.hasher.clone() }
  }
}

impl<S> UserService<S>
where
  S: DirectoryStore,
{
  pub fn new(store: Arc<S>, hasher: Arc<dyn PasswordHasher>) -> Self {
    Self { store, hasher }
  }

  pub async fn list(&self) -> Result<Vec<User>> {
    self.store.list_users().await.map_err(Error::store)
  }

  pub async fn get(&self, id: Uuid) -> Result<User> {
    self
      .store
      .get_user(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UserNotFound(id))
  }

  /// Create a user from an explicit payload. Email must be unused.
  pub async fn create(&self, input: NewUser) -> Result<User> {
    if self
      .store
      .get_user_by_email(&input.email)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(Error::UserExists(input.email));
    }

    if let Some(person_id) = input.person_id {
      if self
        .store
        .get_person(person_id)
        .await
        .map_err(Error::store)?
        .is_none()
      {
        return Err(Error::PersonNotFound(person_id));
      }
    }

    let password_hash = self.hasher.hash(&input.password)?;
    self
      .store
      .create_user(NewUserRecord {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        mobile_number: input.mobile_number,
        password_hash,
        person_id: input.person_id,
      })
      .await
      .map_err(Error::store)
  }

  /// Provision a login for an existing person, linked 1:1.
  ///
  /// The initial password is derived from the person's name; it is expected
  /// to be changed at first login.
  pub async fn create_user_from_person(&self, person: &Person) -> Result<User> {
    if self
      .store
      .get_user_by_email(&person.email)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(Error::UserExists(person.email.clone()));
    }

    let initial = format!("{}{}", person.first_name, person.last_name);
    let password_hash = self.hasher.hash(&initial)?;
    self
      .store
      .create_user(NewUserRecord {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        email: person.email.clone(),
        mobile_number: person.mobile_number.clone(),
        password_hash,
        person_id: Some(person.person_id),
      })
      .await
      .map_err(Error::store)
  }
}

// ─── AuthService ─────────────────────────────────────────────────────────────

pub struct AuthService<S> {
  store:  Arc<S>,
  hasher: Arc<dyn PasswordHasher>,
  tokens: Arc<dyn TokenIssuer>,
}

impl<S> Clone for AuthService<S> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      hasher: self.hasher.clone(),
      tokens: self.tokens.clone(),
    }
  }
}

impl<S> AuthService<S>
where
  S: DirectoryStore,
{
  pub fn new(
    store: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
  ) -> Self {
    Self { store, hasher, tokens }
  }

  /// Verify credentials and issue a bearer token.
  ///
  /// Unknown emails and wrong passwords both surface as
  /// `InvalidCredentials`; the caller learns nothing about which it was.
  pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
    let user = self
      .store
      .get_user_by_email(email)
      .await
      .map_err(Error::store)?
      .ok_or(Error::InvalidCredentials)?;

    if !self.hasher.verify(password, &user.password_hash)? {
      return Err(Error::InvalidCredentials);
    }

    let access_token = self.tokens.issue(&user.email)?;

    let person = match user.person_id {
      Some(person_id) => {
        self.store.get_person(person_id).await.map_err(Error::store)?
      }
      None => None,
    };

    Ok(AuthResponse {
      access_token,
      token_type: "bearer".to_string(),
      user,
      person,
    })
  }

  /// Decode a bearer token and return its subject (the user's email).
  pub fn current_user(&self, token: &str) -> Result<String> {
    self.tokens.decode(token).map_err(|_| Error::InvalidCredentials)
  }

  /// Resolve a bearer token to the user it was issued for.
  pub async fn authenticated_user(&self, token: &str) -> Result<User> {
    let email = self.current_user(token)?;
    self
      .store
      .get_user_by_email(&email)
      .await
      .map_err(Error::store)?
      .ok_or(Error::InvalidCredentials)
  }
}
