//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings and plain dates as ISO 8601
//! (`YYYY-MM-DD`). Enums are stored as their lowercase discriminants. UUIDs
//! are stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use parish_core::{
  address::{Address, AddressKind},
  household::Household,
  media::{MediaItem, StorageBackend},
  person::{Gender, MaritalStatus, Person, SocialMediaKind, SocialMediaLink},
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str {
  match g {
    Gender::Male => "male",
    Gender::Female => "female",
  }
}

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "male" => Ok(Gender::Male),
    "female" => Ok(Gender::Female),
    other => Err(Error::Decode(format!("unknown gender: {other:?}"))),
  }
}

// ─── MaritalStatus ───────────────────────────────────────────────────────────

pub fn encode_marital_status(m: MaritalStatus) -> &'static str {
  match m {
    MaritalStatus::Single => "single",
    MaritalStatus::Married => "married",
    MaritalStatus::Divorced => "divorced",
    MaritalStatus::Remarried => "remarried",
  }
}

pub fn decode_marital_status(s: &str) -> Result<MaritalStatus> {
  match s {
    "single" => Ok(MaritalStatus::Single),
    "married" => Ok(MaritalStatus::Married),
    "divorced" => Ok(MaritalStatus::Divorced),
    "remarried" => Ok(MaritalStatus::Remarried),
    other => Err(Error::Decode(format!("unknown marital status: {other:?}"))),
  }
}

// ─── SocialMediaKind ─────────────────────────────────────────────────────────

pub fn encode_social_kind(k: SocialMediaKind) -> &'static str {
  match k {
    SocialMediaKind::Linkedin => "linkedin",
    SocialMediaKind::Facebook => "facebook",
    SocialMediaKind::Twitter => "twitter",
    SocialMediaKind::Instagram => "instagram",
    SocialMediaKind::Tiktok => "tiktok",
  }
}

pub fn decode_social_kind(s: &str) -> Result<SocialMediaKind> {
  match s {
    "linkedin" => Ok(SocialMediaKind::Linkedin),
    "facebook" => Ok(SocialMediaKind::Facebook),
    "twitter" => Ok(SocialMediaKind::Twitter),
    "instagram" => Ok(SocialMediaKind::Instagram),
    "tiktok" => Ok(SocialMediaKind::Tiktok),
    other => Err(Error::Decode(format!("unknown social media kind: {other:?}"))),
  }
}

// ─── AddressKind ─────────────────────────────────────────────────────────────

pub fn encode_address_kind(k: AddressKind) -> &'static str {
  match k {
    AddressKind::Home => "home",
    AddressKind::Business => "business",
    AddressKind::StudentAccommodation => "student_accommodation",
  }
}

pub fn decode_address_kind(s: &str) -> Result<AddressKind> {
  match s {
    "home" => Ok(AddressKind::Home),
    "business" => Ok(AddressKind::Business),
    "student_accommodation" => Ok(AddressKind::StudentAccommodation),
    other => Err(Error::Decode(format!("unknown address kind: {other:?}"))),
  }
}

// ─── StorageBackend ──────────────────────────────────────────────────────────

pub fn encode_backend(b: StorageBackend) -> &'static str {
  match b {
    StorageBackend::Local => "local",
    StorageBackend::S3 => "s3",
  }
}

pub fn decode_backend(s: &str) -> Result<StorageBackend> {
  match s {
    "local" => Ok(StorageBackend::Local),
    "s3" => Ok(StorageBackend::S3),
    other => Err(Error::Decode(format!("unknown storage backend: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub person_id:       String,
  pub created_at:      String,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  pub mobile_number:   String,
  pub date_of_birth:   Option<String>,
  pub gender:          Option<String>,
  pub marriage_date:   Option<String>,
  pub marital_status:  Option<String>,
  pub registered_date: Option<String>,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:       decode_uuid(&self.person_id)?,
      created_at:      decode_dt(&self.created_at)?,
      first_name:      self.first_name,
      last_name:       self.last_name,
      email:           self.email,
      mobile_number:   self.mobile_number,
      date_of_birth:   self.date_of_birth.as_deref().map(decode_date).transpose()?,
      gender:          self.gender.as_deref().map(decode_gender).transpose()?,
      marriage_date:   self.marriage_date.as_deref().map(decode_date).transpose()?,
      marital_status:  self
        .marital_status
        .as_deref()
        .map(decode_marital_status)
        .transpose()?,
      registered_date: self
        .registered_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
    })
  }
}

/// Raw strings read directly from a `social_media_links` row.
pub struct RawSocialLink {
  pub link_id:   String,
  pub person_id: String,
  pub kind:      String,
  pub url:       String,
}

impl RawSocialLink {
  pub fn into_link(self) -> Result<SocialMediaLink> {
    Ok(SocialMediaLink {
      link_id:   decode_uuid(&self.link_id)?,
      person_id: decode_uuid(&self.person_id)?,
      kind:      decode_social_kind(&self.kind)?,
      url:       self.url,
    })
  }
}

/// Raw strings read directly from an `addresses` row.
pub struct RawAddress {
  pub address_id:    String,
  pub kind:          String,
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

impl RawAddress {
  pub fn into_address(self) -> Result<Address> {
    Ok(Address {
      address_id:    decode_uuid(&self.address_id)?,
      kind:          decode_address_kind(&self.kind)?,
      street_number: self.street_number,
      street:        self.street,
      suburb:        self.suburb,
      city:          self.city,
      province:      self.province,
      country:       self.country,
      postal_code:   self.postal_code,
      latitude:      self.latitude,
      longitude:     self.longitude,
    })
  }
}

/// Raw strings read directly from a `households` row.
pub struct RawHousehold {
  pub household_id: String,
  pub created_at:   String,
  pub leader_id:    String,
  pub address_id:   String,
}

impl RawHousehold {
  pub fn into_household(self) -> Result<Household> {
    Ok(Household {
      household_id: decode_uuid(&self.household_id)?,
      created_at:   decode_dt(&self.created_at)?,
      leader_id:    decode_uuid(&self.leader_id)?,
      address_id:   decode_uuid(&self.address_id)?,
    })
  }
}

/// Raw strings read directly from a `media_items` row.
pub struct RawMediaItem {
  pub media_id:     String,
  pub created_at:   String,
  pub content_type: String,
  pub description:  Option<String>,
  pub backend:      String,
  pub location:     String,
}

impl RawMediaItem {
  pub fn into_item(self) -> Result<MediaItem> {
    Ok(MediaItem {
      media_id:     decode_uuid(&self.media_id)?,
      created_at:   decode_dt(&self.created_at)?,
      content_type: self.content_type,
      description:  self.description,
      backend:      decode_backend(&self.backend)?,
      location:     self.location,
    })
  }
}

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:       String,
  pub created_at:    String,
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub mobile_number: String,
  pub password_hash: String,
  pub person_id:     Option<String>,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:       decode_uuid(&self.user_id)?,
      created_at:    decode_dt(&self.created_at)?,
      first_name:    self.first_name,
      last_name:     self.last_name,
      email:         self.email,
      mobile_number: self.mobile_number,
      password_hash: self.password_hash,
      person_id:     self
        .person_id
        .as_deref()
        .map(decode_uuid)
        .transpose()?,
    })
  }
}
