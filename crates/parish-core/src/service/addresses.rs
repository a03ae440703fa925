//! [`AddressService`] — standalone address lookup and creation.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  address::{Address, NewAddress},
  store::DirectoryStore,
  Error, Result,
};

pub struct AddressService<S> {
  store: Arc<S>,
}

impl<S> Clone for AddressService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone() }
  }
}

impl<S> AddressService<S>
where
  S: DirectoryStore,
{
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  pub async fn list(&self) -> Result<Vec<Address>> {
    self.store.list_addresses().await.map_err(Error::store)
  }

  pub async fn get(&self, id: Uuid) -> Result<Address> {
    self
      .store
      .get_address(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AddressNotFound(id))
  }

  /// Create a new address row. Duplicates are not detected; every call
  /// produces a fresh row.
  pub async fn create(&self, input: NewAddress) -> Result<Address> {
    self.store.create_address(input).await.map_err(Error::store)
  }
}
