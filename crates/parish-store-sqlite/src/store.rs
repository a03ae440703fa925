//! [`SqliteStore`] — the SQLite implementation of [`DirectoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use parish_core::{
  address::{Address, NewAddress},
  household::Household,
  media::{MediaItem, NewMediaItem},
  person::{
    Person, PersonFields, SocialMediaLink, SocialMediaLinkInput,
  },
  store::DirectoryStore,
  user::{NewUserRecord, User},
};

use crate::{
  encode::{
    encode_address_kind, encode_backend, encode_date, encode_dt,
    encode_gender, encode_marital_status, encode_social_kind, encode_uuid,
    RawAddress, RawHousehold, RawMediaItem, RawPerson, RawSocialLink, RawUser,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

const PERSON_COLS: &str = "person_id, created_at, first_name, last_name, \
                           email, mobile_number, date_of_birth, gender, \
                           marriage_date, marital_status, registered_date";

fn person_row(row: &rusqlite::Row) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:       row.get(0)?,
    created_at:      row.get(1)?,
    first_name:      row.get(2)?,
    last_name:       row.get(3)?,
    email:           row.get(4)?,
    mobile_number:   row.get(5)?,
    date_of_birth:   row.get(6)?,
    gender:          row.get(7)?,
    marriage_date:   row.get(8)?,
    marital_status:  row.get(9)?,
    registered_date: row.get(10)?,
  })
}

const ADDRESS_COLS: &str = "address_id, kind, street_number, street, suburb, \
                            city, province, country, postal_code, latitude, \
                            longitude";

fn address_row(row: &rusqlite::Row) -> rusqlite::Result<RawAddress> {
  Ok(RawAddress {
    address_id:    row.get(0)?,
    kind:          row.get(1)?,
    street_number: row.get(2)?,
    street:        row.get(3)?,
    suburb:        row.get(4)?,
    city:          row.get(5)?,
    province:      row.get(6)?,
    country:       row.get(7)?,
    postal_code:   row.get(8)?,
    latitude:      row.get(9)?,
    longitude:     row.get(10)?,
  })
}

fn household_row(row: &rusqlite::Row) -> rusqlite::Result<RawHousehold> {
  Ok(RawHousehold {
    household_id: row.get(0)?,
    created_at:   row.get(1)?,
    leader_id:    row.get(2)?,
    address_id:   row.get(3)?,
  })
}

fn media_row(row: &rusqlite::Row) -> rusqlite::Result<RawMediaItem> {
  Ok(RawMediaItem {
    media_id:     row.get(0)?,
    created_at:   row.get(1)?,
    content_type: row.get(2)?,
    description:  row.get(3)?,
    backend:      row.get(4)?,
    location:     row.get(5)?,
  })
}

const USER_COLS: &str = "user_id, created_at, first_name, last_name, email, \
                         mobile_number, password_hash, person_id";

fn user_row(row: &rusqlite::Row) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    created_at:    row.get(1)?,
    first_name:    row.get(2)?,
    last_name:     row.get(3)?,
    email:         row.get(4)?,
    mobile_number: row.get(5)?,
    password_hash: row.get(6)?,
    person_id:     row.get(7)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A parish member directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── DirectoryStore impl ─────────────────────────────────────────────────────

impl DirectoryStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, fields: PersonFields) -> Result<Person> {
    let person = Person {
      person_id:       Uuid::new_v4(),
      created_at:      Utc::now(),
      first_name:      fields.first_name,
      last_name:       fields.last_name,
      email:           fields.email,
      mobile_number:   fields.mobile_number,
      date_of_birth:   fields.date_of_birth,
      gender:          fields.gender,
      marriage_date:   fields.marriage_date,
      marital_status:  fields.marital_status,
      registered_date: fields.registered_date,
    };

    let id_str         = encode_uuid(person.person_id);
    let at_str         = encode_dt(person.created_at);
    let first_name     = person.first_name.clone();
    let last_name      = person.last_name.clone();
    let email          = person.email.clone();
    let mobile_number  = person.mobile_number.clone();
    let dob_str        = person.date_of_birth.map(encode_date);
    let gender_str     = person.gender.map(encode_gender).map(str::to_owned);
    let marriage_str   = person.marriage_date.map(encode_date);
    let marital_str    = person
      .marital_status
      .map(encode_marital_status)
      .map(str::to_owned);
    let registered_str = person.registered_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (
             person_id, created_at, first_name, last_name, email,
             mobile_number, date_of_birth, gender, marriage_date,
             marital_status, registered_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            at_str,
            first_name,
            last_name,
            email,
            mobile_number,
            dob_str,
            gender_str,
            marriage_str,
            marital_str,
            registered_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLS} FROM people WHERE person_id = ?1"),
            rusqlite::params![id_str],
            person_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_people(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLS} FROM people ORDER BY last_name, first_name"
        ))?;
        let rows = stmt
          .query_map([], person_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn update_person(&self, id: Uuid, fields: PersonFields) -> Result<()> {
    let id_str         = encode_uuid(id);
    let dob_str        = fields.date_of_birth.map(encode_date);
    let gender_str     = fields.gender.map(encode_gender).map(str::to_owned);
    let marriage_str   = fields.marriage_date.map(encode_date);
    let marital_str    = fields
      .marital_status
      .map(encode_marital_status)
      .map(str::to_owned);
    let registered_str = fields.registered_date.map(encode_date);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE people SET
             first_name = ?2, last_name = ?3, email = ?4, mobile_number = ?5,
             date_of_birth = ?6, gender = ?7, marriage_date = ?8,
             marital_status = ?9, registered_date = ?10
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            fields.first_name,
            fields.last_name,
            fields.email,
            fields.mobile_number,
            dob_str,
            gender_str,
            marriage_str,
            marital_str,
            registered_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Social-media links ────────────────────────────────────────────────────

  async fn social_media_links(
    &self,
    person_id: Uuid,
  ) -> Result<Vec<SocialMediaLink>> {
    let person_str = encode_uuid(person_id);

    let raws: Vec<RawSocialLink> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT link_id, person_id, kind, url FROM social_media_links
           WHERE person_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], |row| {
            Ok(RawSocialLink {
              link_id:   row.get(0)?,
              person_id: row.get(1)?,
              kind:      row.get(2)?,
              url:       row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSocialLink::into_link).collect()
  }

  async fn delete_social_media_links(&self, person_id: Uuid) -> Result<()> {
    let person_str = encode_uuid(person_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM social_media_links WHERE person_id = ?1",
          rusqlite::params![person_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn create_social_media_link(
    &self,
    person_id: Uuid,
    link: SocialMediaLinkInput,
  ) -> Result<SocialMediaLink> {
    let out = SocialMediaLink {
      link_id: Uuid::new_v4(),
      person_id,
      kind: link.kind,
      url: link.url,
    };

    let link_str   = encode_uuid(out.link_id);
    let person_str = encode_uuid(person_id);
    let kind_str   = encode_social_kind(out.kind).to_owned();
    let url        = out.url.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO social_media_links (link_id, person_id, kind, url)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![link_str, person_str, kind_str, url],
        )?;
        Ok(())
      })
      .await?;

    Ok(out)
  }

  // ── Addresses ─────────────────────────────────────────────────────────────

  async fn create_address(&self, input: NewAddress) -> Result<Address> {
    let address = Address {
      address_id:    Uuid::new_v4(),
      kind:          input.kind,
      street_number: input.street_number,
      street:        input.street,
      suburb:        input.suburb,
      city:          input.city,
      province:      input.province,
      country:       input.country,
      postal_code:   input.postal_code,
      latitude:      input.latitude,
      longitude:     input.longitude,
    };

    let id_str   = encode_uuid(address.address_id);
    let kind_str = encode_address_kind(address.kind).to_owned();
    let a        = address.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO addresses (
             address_id, kind, street_number, street, suburb, city,
             province, country, postal_code, latitude, longitude
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id_str,
            kind_str,
            a.street_number,
            a.street,
            a.suburb,
            a.city,
            a.province,
            a.country,
            a.postal_code,
            a.latitude,
            a.longitude,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(address)
  }

  async fn get_address(&self, id: Uuid) -> Result<Option<Address>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAddress> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {ADDRESS_COLS} FROM addresses WHERE address_id = ?1"
            ),
            rusqlite::params![id_str],
            address_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAddress::into_address).transpose()
  }

  async fn list_addresses(&self) -> Result<Vec<Address>> {
    let raws: Vec<RawAddress> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ADDRESS_COLS} FROM addresses ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], address_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAddress::into_address).collect()
  }

  async fn person_addresses(&self, person_id: Uuid) -> Result<Vec<Address>> {
    let person_str = encode_uuid(person_id);

    let raws: Vec<RawAddress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM addresses a
           JOIN people_addresses pa ON pa.address_id = a.address_id
           WHERE pa.person_id = ?1
           ORDER BY pa.rowid",
          "a.address_id, a.kind, a.street_number, a.street, a.suburb, \
           a.city, a.province, a.country, a.postal_code, a.latitude, \
           a.longitude"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], address_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAddress::into_address).collect()
  }

  async fn unlink_person_addresses(&self, person_id: Uuid) -> Result<()> {
    let person_str = encode_uuid(person_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM people_addresses WHERE person_id = ?1",
          rusqlite::params![person_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn link_address_to_person(
    &self,
    person_id: Uuid,
    address_id: Uuid,
  ) -> Result<()> {
    let person_str  = encode_uuid(person_id);
    let address_str = encode_uuid(address_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO people_addresses (person_id, address_id)
           VALUES (?1, ?2)",
          rusqlite::params![person_str, address_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Households ────────────────────────────────────────────────────────────

  async fn create_household(
    &self,
    leader_id: Uuid,
    address_id: Uuid,
  ) -> Result<Household> {
    let household = Household {
      household_id: Uuid::new_v4(),
      created_at: Utc::now(),
      leader_id,
      address_id,
    };

    let id_str      = encode_uuid(household.household_id);
    let at_str      = encode_dt(household.created_at);
    let leader_str  = encode_uuid(leader_id);
    let address_str = encode_uuid(address_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO households (household_id, created_at, leader_id, address_id)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, at_str, leader_str, address_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(household)
  }

  async fn get_household(&self, id: Uuid) -> Result<Option<Household>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawHousehold> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT household_id, created_at, leader_id, address_id
             FROM households WHERE household_id = ?1",
            rusqlite::params![id_str],
            household_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawHousehold::into_household).transpose()
  }

  async fn list_households(&self) -> Result<Vec<Household>> {
    let raws: Vec<RawHousehold> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT household_id, created_at, leader_id, address_id
           FROM households ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map([], household_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHousehold::into_household).collect()
  }

  async fn update_household(
    &self,
    id: Uuid,
    leader_id: Uuid,
    address_id: Uuid,
  ) -> Result<()> {
    let id_str      = encode_uuid(id);
    let leader_str  = encode_uuid(leader_id);
    let address_str = encode_uuid(address_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE households SET leader_id = ?2, address_id = ?3
           WHERE household_id = ?1",
          rusqlite::params![id_str, leader_str, address_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn household_member_ids(&self, household_id: Uuid) -> Result<Vec<Uuid>> {
    let household_str = encode_uuid(household_id);

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT person_id FROM household_people
           WHERE household_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![household_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    ids
      .iter()
      .map(|s| Uuid::parse_str(s).map_err(Error::Uuid))
      .collect()
  }

  async fn household_ids_for_person(&self, person_id: Uuid) -> Result<Vec<Uuid>> {
    let person_str = encode_uuid(person_id);

    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT household_id FROM household_people
           WHERE person_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    ids
      .iter()
      .map(|s| Uuid::parse_str(s).map_err(Error::Uuid))
      .collect()
  }

  async fn add_person_to_household(
    &self,
    household_id: Uuid,
    person_id: Uuid,
  ) -> Result<()> {
    let household_str = encode_uuid(household_id);
    let person_str    = encode_uuid(person_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO household_people (household_id, person_id)
           VALUES (?1, ?2)",
          rusqlite::params![household_str, person_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove_person_from_household(
    &self,
    household_id: Uuid,
    person_id: Uuid,
  ) -> Result<()> {
    let household_str = encode_uuid(household_id);
    let person_str    = encode_uuid(person_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM household_people
           WHERE household_id = ?1 AND person_id = ?2",
          rusqlite::params![household_str, person_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Media ─────────────────────────────────────────────────────────────────

  async fn create_media_item(&self, input: NewMediaItem) -> Result<MediaItem> {
    let item = MediaItem {
      media_id:     Uuid::new_v4(),
      created_at:   Utc::now(),
      content_type: input.content_type,
      description:  input.description,
      backend:      input.backend,
      location:     input.location,
    };

    let id_str       = encode_uuid(item.media_id);
    let at_str       = encode_dt(item.created_at);
    let content_type = item.content_type.clone();
    let description  = item.description.clone();
    let backend_str  = encode_backend(item.backend).to_owned();
    let location     = item.location.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO media_items (
             media_id, created_at, content_type, description, backend, location
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            at_str,
            content_type,
            description,
            backend_str,
            location,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(item)
  }

  async fn get_media_item(&self, id: Uuid) -> Result<Option<MediaItem>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMediaItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT media_id, created_at, content_type, description, backend,
                    location
             FROM media_items WHERE media_id = ?1",
            rusqlite::params![id_str],
            media_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMediaItem::into_item).transpose()
  }

  async fn add_person_image(&self, person_id: Uuid, media_id: Uuid) -> Result<()> {
    let person_str = encode_uuid(person_id);
    let media_str  = encode_uuid(media_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people_images (person_id, media_id)
           VALUES (?1, ?2)",
          rusqlite::params![person_str, media_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn person_images(&self, person_id: Uuid) -> Result<Vec<MediaItem>> {
    let person_str = encode_uuid(person_id);

    let raws: Vec<RawMediaItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT m.media_id, m.created_at, m.content_type, m.description,
                  m.backend, m.location
           FROM media_items m
           JOIN people_images pi ON pi.media_id = m.media_id
           WHERE pi.person_id = ?1
           ORDER BY pi.rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_str], media_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMediaItem::into_item).collect()
  }

  async fn latest_person_image(
    &self,
    person_id: Uuid,
  ) -> Result<Option<MediaItem>> {
    let person_str = encode_uuid(person_id);

    let raw: Option<RawMediaItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT m.media_id, m.created_at, m.content_type, m.description,
                    m.backend, m.location
             FROM media_items m
             JOIN people_images pi ON pi.media_id = m.media_id
             WHERE pi.person_id = ?1
             ORDER BY pi.rowid DESC
             LIMIT 1",
            rusqlite::params![person_str],
            media_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMediaItem::into_item).transpose()
  }

  async fn add_household_image(
    &self,
    household_id: Uuid,
    media_id: Uuid,
  ) -> Result<()> {
    let household_str = encode_uuid(household_id);
    let media_str     = encode_uuid(media_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO household_images (household_id, media_id)
           VALUES (?1, ?2)",
          rusqlite::params![household_str, media_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn latest_household_image(
    &self,
    household_id: Uuid,
  ) -> Result<Option<MediaItem>> {
    let household_str = encode_uuid(household_id);

    let raw: Option<RawMediaItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT m.media_id, m.created_at, m.content_type, m.description,
                    m.backend, m.location
             FROM media_items m
             JOIN household_images hi ON hi.media_id = m.media_id
             WHERE hi.household_id = ?1
             ORDER BY hi.rowid DESC
             LIMIT 1",
            rusqlite::params![household_str],
            media_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMediaItem::into_item).transpose()
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUserRecord) -> Result<User> {
    let user = User {
      user_id:       Uuid::new_v4(),
      created_at:    Utc::now(),
      first_name:    input.first_name,
      last_name:     input.last_name,
      email:         input.email,
      mobile_number: input.mobile_number,
      password_hash: input.password_hash,
      person_id:     input.person_id,
    };

    let id_str        = encode_uuid(user.user_id);
    let at_str        = encode_dt(user.created_at);
    let first_name    = user.first_name.clone();
    let last_name     = user.last_name.clone();
    let email         = user.email.clone();
    let mobile_number = user.mobile_number.clone();
    let password_hash = user.password_hash.clone();
    let person_str    = user.person_id.map(encode_uuid);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             user_id, created_at, first_name, last_name, email,
             mobile_number, password_hash, person_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            at_str,
            first_name,
            last_name,
            email,
            mobile_number,
            password_hash,
            person_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE user_id = ?1"),
            rusqlite::params![id_str],
            user_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
            rusqlite::params![email],
            user_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLS} FROM users ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map([], user_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }
}
