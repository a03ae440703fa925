//! Postal addresses.
//!
//! Addresses are standalone rows referenced by id from people and
//! households. Nothing deduplicates them: creating the same address twice
//! yields two rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
  Home,
  Business,
  StudentAccommodation,
}

/// A persisted structured postal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
  pub address_id:    Uuid,
  pub kind:          AddressKind,
  pub street_number: String,
  pub street:        String,
  pub suburb:        String,
  pub city:          String,
  pub province:      String,
  pub country:       String,
  pub postal_code:   Option<String>,
  pub latitude:      Option<f64>,
  pub longitude:     Option<f64>,
}

/// Input to [`DirectoryStore::create_address`](crate::store::DirectoryStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAddress {
  pub kind:          AddressKind,
  pub street_number: String,
  pub street:        String,
  pub suburb:        String,
  pub city:          String,
  pub province:      String,
  pub country:       String,
  pub postal_code:   Option<String>,
  pub latitude:      Option<f64>,
  pub longitude:     Option<f64>,
}
