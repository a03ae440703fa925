//! [`HouseholdService`] — household lifecycle and membership
//! reconciliation.
//!
//! The leader-is-a-member invariant is enforced here on every write path.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  household::{Household, HouseholdUpdate, HouseholdView, NewHousehold},
  reconcile::reconcile,
  store::DirectoryStore,
  Error, Result,
};

pub struct HouseholdService<S> {
  store: Arc<S>,
}

impl<S> Clone for HouseholdService<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone() }
  }
}

impl<S> HouseholdService<S>
where
  S: DirectoryStore,
{
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  pub async fn list(&self) -> Result<Vec<HouseholdView>> {
    let households =
      self.store.list_households().await.map_err(Error::store)?;
    let mut views = Vec::with_capacity(households.len());
    for household in households {
      views.push(self.hydrate(household).await?);
    }
    Ok(views)
  }

  pub async fn get(&self, id: Uuid) -> Result<HouseholdView> {
    let household = self
      .store
      .get_household(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::HouseholdNotFound(id))?;
    self.hydrate(household).await
  }

  /// Create a household with its initial members.
  ///
  /// When no leader is named, the first listed person leads. All
  /// validation runs before any row is written.
  pub async fn create(&self, input: NewHousehold) -> Result<HouseholdView> {
    let member_ids = reconcile(&[], &input.people_ids).to_add;
    if member_ids.is_empty() {
      return Err(Error::HouseholdHasNoMembers);
    }

    let leader_id = match input.leader_id {
      Some(leader_id) => {
        if !member_ids.contains(&leader_id) {
          return Err(Error::LeaderNotMember { person: leader_id });
        }
        leader_id
      }
      None => member_ids[0],
    };

    for &person_id in &member_ids {
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
    self.validate_address(input.address_id).await?;
    if let Some(image_id) = input.image_id {
      self.validate_image(image_id).await?;
    }

    let household = self
      .store
      .create_household(leader_id, input.address_id)
      .await
      .map_err(Error::store)?;

    for &person_id in &member_ids {
      self
        .store
        .add_person_to_household(household.household_id, person_id)
        .await
        .map_err(Error::store)?;
    }

    if let Some(image_id) = input.image_id {
      self
        .store
        .add_household_image(household.household_id, image_id)
        .await
        .map_err(Error::store)?;
    }

    self.get(household.household_id).await
  }

  /// Apply a partial update, reconciling membership when a member list is
  /// supplied.
  pub async fn update(
    &self,
    id: Uuid,
    input: HouseholdUpdate,
  ) -> Result<HouseholdView> {
    let existing = self
      .store
      .get_household(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::HouseholdNotFound(id))?;

    let leader_id = input.leader_id.unwrap_or(existing.leader_id);
    let address_id = input.address_id.unwrap_or(existing.address_id);

    let existing_members =
      self.store.household_member_ids(id).await.map_err(Error::store)?;

    let delta = match &input.people_ids {
      Some(desired) => {
        for &person_id in desired {
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
        // The (possibly unchanged) leader must survive the new member
        // list.
        if !desired.contains(&leader_id) {
          return Err(Error::CannotRemoveLeader {
            person:    leader_id,
            household: id,
          });
        }
        reconcile(&existing_members, desired)
      }
      None => {
        // Membership untouched; a new leader must already be a member.
        if leader_id != existing.leader_id
          && !existing_members.contains(&leader_id)
        {
          return Err(Error::LeaderNotMember { person: leader_id });
        }
        reconcile(&existing_members, &existing_members)
      }
    };

    if input.address_id.is_some() {
      self.validate_address(address_id).await?;
    }
    if let Some(image_id) = input.image_id {
      self.validate_image(image_id).await?;
    }

    self
      .store
      .update_household(id, leader_id, address_id)
      .await
      .map_err(Error::store)?;

    for &person_id in &delta.to_add {
      self
        .store
        .add_person_to_household(id, person_id)
        .await
        .map_err(Error::store)?;
    }
    for &person_id in &delta.to_remove {
      self
        .store
        .remove_person_from_household(id, person_id)
        .await
        .map_err(Error::store)?;
    }

    if let Some(image_id) = input.image_id {
      self
        .store
        .add_household_image(id, image_id)
        .await
        .map_err(Error::store)?;
    }

    self.get(id).await
  }

  // ── Validation ────────────────────────────────────────────────────────

  async fn validate_address(&self, address_id: Uuid) -> Result<()> {
    if self
      .store
      .get_address(address_id)
      .await
      .map_err(Error::store)?
      .is_none()
    {
      return Err(Error::AddressNotFound(address_id));
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

  async fn hydrate(&self, household: Household) -> Result<HouseholdView> {
    let leader = self
      .store
      .get_person(household.leader_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(household.leader_id))?;
    let address = self
      .store
      .get_address(household.address_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::AddressNotFound(household.address_id))?;

    let member_ids = self
      .store
      .household_member_ids(household.household_id)
      .await
      .map_err(Error::store)?;
    let mut members = Vec::with_capacity(member_ids.len());
    for person_id in member_ids {
      members.push(
        self
          .store
          .get_person(person_id)
          .await
          .map_err(Error::store)?
          .ok_or(Error::PersonNotFound(person_id))?,
      );
    }

    let household_image = self
      .store
      .latest_household_image(household.household_id)
      .await
      .map_err(Error::store)?;

    Ok(HouseholdView { household, leader, address, members, household_image })
  }
}
