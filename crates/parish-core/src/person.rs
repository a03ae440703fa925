//! Person — the primary record of the member directory.
//!
//! The persisted row holds scalar attributes only; links, addresses,
//! household memberships, and profile images live in their own tables and
//! are assembled into a [`PersonView`] on read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  address::{Address, NewAddress},
  household::Household,
  media::MediaItem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
  Single,
  Married,
  Divorced,
  Remarried,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialMediaKind {
  Linkedin,
  Facebook,
  Twitter,
  Instagram,
  Tiktok,
}

/// A persisted social-media link. Links are owned by their person and are
/// replaced wholesale on update, never patched individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialMediaLink {
  pub link_id:   Uuid,
  pub person_id: Uuid,
  pub kind:      SocialMediaKind,
  pub url:       String,
}

/// Input form of a social-media link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaLinkInput {
  pub kind: SocialMediaKind,
  pub url:  String,
}

/// Scalar person attributes, shared by the create and update payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonFields {
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub mobile_number:   String,
  pub date_of_birth:   Option<NaiveDate>,
  pub gender:          Option<Gender>,
  pub marriage_date:   Option<NaiveDate>,
  pub marital_status:  Option<MaritalStatus>,
  /// Defaulted to today by the create path when absent.
  pub registered_date: Option<NaiveDate>,
}

/// A persisted person row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:       Uuid,
  pub created_at:      DateTime<Utc>,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub mobile_number:   String,
  pub date_of_birth:   Option<NaiveDate>,
  pub gender:          Option<Gender>,
  pub marriage_date:   Option<NaiveDate>,
  pub marital_status:  Option<MaritalStatus>,
  pub registered_date: Option<NaiveDate>,
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// Payload for creating a person.
///
/// Addresses arrive inline and are synthesized into brand-new rows with no
/// duplicate detection; household ids must reference existing households.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  #[serde(flatten)]
  pub fields:             PersonFields,
  #[serde(default)]
  pub social_media_links: Vec<SocialMediaLinkInput>,
  #[serde(default)]
  pub addresses:          Vec<NewAddress>,
  #[serde(default)]
  pub household_ids:      Vec<Uuid>,
  pub profile_image_id:   Option<Uuid>,
  /// Provision a login for this person once created.
  #[serde(default)]
  pub create_login:       bool,
}

/// Payload for updating a person.
///
/// Sub-collections (links, address associations) are replaced wholesale;
/// household membership is the only relationship reconciled incrementally.
/// Address ids re-link existing rows — no new address rows are created here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonUpdate {
  #[serde(flatten)]
  pub fields:             PersonFields,
  #[serde(default)]
  pub social_media_links: Vec<SocialMediaLinkInput>,
  #[serde(default)]
  pub address_ids:        Vec<Uuid>,
  #[serde(default)]
  pub household_ids:      Vec<Uuid>,
  /// Appended to the profile-image history; earlier images are retained.
  pub profile_image_id:   Option<Uuid>,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// The fully hydrated person — assembled on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonView {
  #[serde(flatten)]
  pub person:             Person,
  pub social_media_links: Vec<SocialMediaLink>,
  pub addresses:          Vec<Address>,
  pub households:         Vec<Household>,
  /// The most recently attached image wins as "the" profile image.
  pub profile_image:      Option<MediaItem>,
}
