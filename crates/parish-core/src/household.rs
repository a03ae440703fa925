//! Household — a led group of people sharing an address.
//!
//! Invariant: the leader is always a member. Enforced by the services on
//! every create and update; removal of a leader requires reassigning
//! leadership first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{address::Address, media::MediaItem, person::Person};

/// A persisted household row. Membership lives in a join table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
  pub household_id: Uuid,
  pub created_at:   DateTime<Utc>,
  pub leader_id:    Uuid,
  pub address_id:   Uuid,
}

/// Payload for creating a household.
///
/// When `leader_id` is absent the first listed person leads. A named leader
/// must appear in `people_ids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHousehold {
  pub leader_id:  Option<Uuid>,
  pub address_id: Uuid,
  #[serde(default)]
  pub people_ids: Vec<Uuid>,
  pub image_id:   Option<Uuid>,
}

/// Payload for updating a household. Absent fields are left unchanged;
/// `people_ids`, when present, is reconciled against current membership.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdUpdate {
  pub leader_id:  Option<Uuid>,
  pub address_id: Option<Uuid>,
  pub people_ids: Option<Vec<Uuid>>,
  /// Appended to the household-image history; earlier images are retained.
  pub image_id:   Option<Uuid>,
}

/// The fully hydrated household — assembled on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdView {
  #[serde(flatten)]
  pub household:       Household,
  pub leader:          Person,
  pub address:         Address,
  pub members:         Vec<Person>,
  /// The most recently attached image wins as "the" household image.
  pub household_image: Option<MediaItem>,
}
