//! [`PeopleService`] — the person aggregate.
//!
//! Create and update orchestrate scalar fields, social-media links,
//! addresses, household memberships, profile images, and optional login
//! provisioning. All validation completes before the first write, so a
//! failed request leaves no partial person behind.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  media::MediaItem,
  person::{NewPerson, Person, PersonUpdate, PersonView},
  reconcile::reconcile,
  service::{MediaService, UserService},
  store::DirectoryStore,
  user::User,
  Error, Result,
};

/// Outcome of the optional login provisioning that rides along with
/// person creation.
#[derive(Debug, Clone)]
pub enum LoginProvisioning {
  /// The payload did not ask for a login.
  NotRequested,
  Created(User),
  /// Provisioning failed; the person itself was still created.
  Failed(String),
}

/// A freshly created person plus the login-provisioning outcome.
#[derive(Debug, Clone)]
pub struct CreatedPerson {
  pub person: PersonView,
  pub login:  LoginProvisioning,
}

pub struct PeopleService<S> {
  store: Arc<S>,
  media: MediaService<S>,
  users: UserService<S>,
}

impl<S> Clone for PeopleService<S> {
  fn clone(&self) -> Self {
    Self {
      store: self.store.clone(),
      media: self.media.clone(),
      users: self.users.clone(),
    }
  }
}

impl<S> PeopleService<S>
where
  S: DirectoryStore,
{
  pub fn new(
    store: Arc<S>,
    media: MediaService<S>,
    users: UserService<S>,
  ) -> Self {
    Self { store, media, users }
  }

  pub async fn list(&self) -> Result<Vec<PersonView>> {
    let people = self.store.list_people().await.map_err(Error::store)?;
    let mut views = Vec::with_capacity(people.len());
    for person in people {
      views.push(self.hydrate(person).await?);
    }
    Ok(views)
  }

  pub async fn get(&self, id: Uuid) -> Result<PersonView> {
    let person = self
      .store
      .get_person(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(id))?;
    self.hydrate(person).await
  }

  /// Create a person with all sub-resources in one call.
  ///
  /// Inline addresses are synthesized into new rows. Household ids are
  /// all-adds against an empty membership. When `create_login` is set, a
  /// login failure is recorded in the result but does not fail the call.
  pub async fn create(&self, mut input: NewPerson) -> Result<CreatedPerson> {
    self.validate_households(&input.household_ids).await?;
    if let Some(image_id) = input.profile_image_id {
      self.validate_image(image_id).await?;
    }

    if input.fields.registered_date.is_none() {
      input.fields.registered_date = Some(Utc::now().date_naive());
    }

    let person = self
      .store
      .create_person(input.fields)
      .await
      .map_err(Error::store)?;

    for link in input.social_media_links {
      self
        .store
        .create_social_media_link(person.person_id, link)
        .await
        .map_err(Error::store)?;
    }

    for new_address in input.addresses {
      let address = self
        .store
        .create_address(new_address)
        .await
        .map_err(Error::store)?;
      self
        .store
        .link_address_to_person(person.person_id, address.address_id)
        .await
        .map_err(Error::store)?;
    }

    if let Some(image_id) = input.profile_image_id {
      self
        .store
        .add_person_image(person.person_id, image_id)
        .await
        .map_err(Error::store)?;
    }

    let delta = reconcile(&[], &input.household_ids);
    for &household_id in &delta.to_add {
      self
        .store
        .add_person_to_household(household_id, person.person_id)
        .await
        .map_err(Error::store)?;
    }

    let login = if input.create_login {
      match self.users.create_user_from_person(&person).await {
        Ok(user) => LoginProvisioning::Created(user),
        Err(e) => {
          tracing::warn!(
            person_id = %person.person_id,
            error = %e,
            "failed to provision login for new person"
          );
          LoginProvisioning::Failed(e.to_string())
        }
      }
    } else {
      LoginProvisioning::NotRequested
    };

    let person = self.get(person.person_id).await?;
    Ok(CreatedPerson { person, login })
  }

  /// Overwrite a person's fields and sub-resources.
  ///
  /// Links and address associations are replaced wholesale; household
  /// membership is reconciled incrementally. A person who leads a
  /// household cannot be removed from it here.
  pub async fn update(&self, id: Uuid, input: PersonUpdate) -> Result<PersonView> {
    if self.store.get_person(id).await.map_err(Error::store)?.is_none() {
      return Err(Error::PersonNotFound(id));
    }

    self.validate_households(&input.household_ids).await?;

    let existing_households = self
      .store
      .household_ids_for_person(id)
      .await
      .map_err(Error::store)?;
    self
      .validate_leader_not_removed(id, &existing_households, &input.household_ids)
      .await?;

    for &address_id in &input.address_ids {
      if self
        .store
        .get_address(address_id)
        .await
        .map_err(Error::store)?
        .is_none()
      {
        return Err(Error::AddressNotFound(address_id));
      }
    }
    if let Some(image_id) = input.profile_image_id {
      self.validate_image(image_id).await?;
    }

    self
      .store
      .update_person(id, input.fields)
      .await
      .map_err(Error::store)?;

    self
      .store
      .delete_social_media_links(id)
      .await
      .map_err(Error::store)?;
    for link in input.social_media_links {
      self
        .store
        .create_social_media_link(id, link)
        .await
        .map_err(Error::store)?;
    }

    self
      .store
      .unlink_person_addresses(id)
      .await
      .map_err(Error::store)?;
    for &address_id in &input.address_ids {
      self
        .store
        .link_address_to_person(id, address_id)
        .await
        .map_err(Error::store)?;
    }

    if let Some(image_id) = input.profile_image_id {
      self
        .store
        .add_person_image(id, image_id)
        .await
        .map_err(Error::store)?;
    }

    let delta = reconcile(&existing_households, &input.household_ids);
    for &household_id in &delta.to_add {
      self
        .store
        .add_person_to_household(household_id, id)
        .await
        .map_err(Error::store)?;
    }
    for &household_id in &delta.to_remove {
      self
        .store
        .remove_person_from_household(household_id, id)
        .await
        .map_err(Error::store)?;
    }

    self.get(id).await
  }

  // ── Profile images ────────────────────────────────────────────────────

  /// Store an uploaded image and append it to the person's image history.
  pub async fn upload_profile_image(
    &self,
    id: Uuid,
    content_type: &str,
    bytes: &[u8],
  ) -> Result<MediaItem> {
    let person = self
      .store
      .get_person(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(id))?;

    let ext = crate::media::extension_for(content_type)
      .ok_or_else(|| Error::UnsupportedMediaType(content_type.to_string()))?;
    let filename = format!("{}_{}.{ext}", person.person_id, Uuid::new_v4());
    let description = format!(
      "Profile image for {} {}",
      person.first_name, person.last_name
    );

    let item = self
      .media
      .upload_as(&filename, content_type, bytes, Some(description))
      .await?;
    self
      .store
      .add_person_image(id, item.media_id)
      .await
      .map_err(Error::store)?;
    Ok(item)
  }

  /// The person's current profile image and its bytes, if any.
  pub async fn profile_image(
    &self,
    id: Uuid,
  ) -> Result<Option<(MediaItem, Vec<u8>)>> {
    if self.store.get_person(id).await.map_err(Error::store)?.is_none() {
      return Err(Error::PersonNotFound(id));
    }
    let item = self
      .store
      .latest_person_image(id)
      .await
      .map_err(Error::store)?;
    match item {
      Some(item) => {
        let bytes = self.media.read(&item)?;
        Ok(Some((item, bytes)))
      }
      None => Ok(None),
    }
  }

  /// The person's full image history, most recent first.
  pub async fn profile_images(&self, id: Uuid) -> Result<Vec<MediaItem>> {
    if self.store.get_person(id).await.map_err(Error::store)?.is_none() {
      return Err(Error::PersonNotFound(id));
    }
    self.store.person_images(id).await.map_err(Error::store)
  }

  // ── Validation ────────────────────────────────────────────────────────

  async fn validate_households(&self, household_ids: &[Uuid]) -> Result<()> {
    for &household_id in household_ids {
      if self
        .store
        .get_household(household_id)
        .await
        .map_err(Error::store)?
        .is_none()
      {
        return Err(Error::HouseholdNotFound(household_id));
      }
    }
    Ok(())
  }

  /// Reject a membership update that would pull a leader out of the
  /// household they lead.
  async fn validate_leader_not_removed(
    &self,
    person_id: Uuid,
    existing: &[Uuid],
    desired: &[Uuid],
  ) -> Result<()> {
    for &household_id in &reconcile(existing, desired).to_remove {
      let household = self
        .store
        .get_household(household_id)
        .await
        .map_err(Error::store)?
        .ok_or(Error::HouseholdNotFound(household_id))?;
      if household.leader_id == person_id {
        return Err(Error::CannotRemoveLeader {
          person:    person_id,
          household: household_id,
        });
      }
    }
    Ok(())
  }

  async fn validate_image(&self, image_id: Uuid) -> Result<()> {
    if self
      .store
      .get_media_item(image_id)
      .await
      .map_err(Error::store)?
      .is_none()
    {
      return Err(Error::ImageNotFound(image_id));
    }
    Ok(())
  }

  // ── Hydration ─────────────────────────────────────────────────────────

  async fn hydrate(&self, person: Person) -> Result<PersonView> {
    let social_media_links = self
      .store
      .social_media_links(person.person_id)
      .await
      .map_err(Error::store)?;
    let addresses = self
      .store
      .person_addresses(person.person_id)
      .await
      .map_err(Error::store)?;

    let household_ids = self
      .store
      .household_ids_for_person(person.person_id)
      .await
      .map_err(Error::store)?;
    let mut households = Vec::with_capacity(household_ids.len());
    for household_id in household_ids {
      households.push(
        self
          .store
          .get_household(household_id)
          .await
          .map_err(Error::store)?
          .ok_or(Error::HouseholdNotFound(household_id))?,
      );
    }

    let profile_image = self
      .store
      .latest_person_image(person.person_id)
      .await
      .map_err(Error::store)?;

    Ok(PersonView {
      person,
      social_media_links,
      addresses,
      households,
      profile_image,
    })
  }
}
