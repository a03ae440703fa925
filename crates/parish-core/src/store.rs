//! The `DirectoryStore` trait — the persistence abstraction for the
//! member directory.
//!
//! The trait is implemented by storage backends (e.g.
//! `parish-store-sqlite`). The services and the API layer depend on this
//! abstraction, not on any concrete backend. Lookups return `None` on a
//! missing id rather than erroring; turning a miss into a named failure is
//! the services' job.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  address::{Address, NewAddress},
  household::Household,
  media::{MediaItem, NewMediaItem},
  person::{Person, PersonFields, SocialMediaLink, SocialMediaLinkInput},
  user::{NewUserRecord, User},
};

pub trait DirectoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Create and persist a person. The id and creation timestamp are
  /// assigned by the store.
  fn create_person(
    &self,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// List all people, ordered by last then first name.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Overwrite a person's scalar fields.
  fn update_person(
    &self,
    id: Uuid,
    fields: PersonFields,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Social-media links ────────────────────────────────────────────────

  fn social_media_links(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SocialMediaLink>, Self::Error>> + Send + '_;

  /// Delete every link owned by the person.
  fn delete_social_media_links(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn create_social_media_link(
    &self,
    person_id: Uuid,
    link: SocialMediaLinkInput,
  ) -> impl Future<Output = Result<SocialMediaLink, Self::Error>> + Send + '_;

  // ── Addresses ─────────────────────────────────────────────────────────

  fn create_address(
    &self,
    input: NewAddress,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + '_;

  fn get_address(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  fn list_addresses(
    &self,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + '_;

  /// Addresses currently linked to the person, in link order.
  fn person_addresses(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + '_;

  /// Drop every person→address link for the person. Address rows survive.
  fn unlink_person_addresses(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn link_address_to_person(
    &self,
    person_id: Uuid,
    address_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Households ────────────────────────────────────────────────────────

  fn create_household(
    &self,
    leader_id: Uuid,
    address_id: Uuid,
  ) -> impl Future<Output = Result<Household, Self::Error>> + Send + '_;

  fn get_household(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Household>, Self::Error>> + Send + '_;

  fn list_households(
    &self,
  ) -> impl Future<Output = Result<Vec<Household>, Self::Error>> + Send + '_;

  /// Overwrite a household's leader and address references.
  fn update_household(
    &self,
    id: Uuid,
    leader_id: Uuid,
    address_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Member person-ids of the household, in join order.
  fn household_member_ids(
    &self,
    household_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  /// Household-ids the person belongs to, in join order.
  fn household_ids_for_person(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  fn add_person_to_household(
    &self,
    household_id: Uuid,
    person_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn remove_person_from_household(
    &self,
    household_id: Uuid,
    person_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Media ─────────────────────────────────────────────────────────────

  fn create_media_item(
    &self,
    input: NewMediaItem,
  ) -> impl Future<Output = Result<MediaItem, Self::Error>> + Send + '_;

  fn get_media_item(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<MediaItem>, Self::Error>> + Send + '_;

  /// Append an image to the person's profile-image history.
  fn add_person_image(
    &self,
    person_id: Uuid,
    media_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The person's full image history, most recent first.
  fn person_images(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Vec<MediaItem>, Self::Error>> + Send + '_;

  /// The most recently attached profile image, if any.
  fn latest_person_image(
    &self,
    person_id: Uuid,
  ) -> impl Future<Output = Result<Option<MediaItem>, Self::Error>> + Send + '_;

  /// Append an image to the household's image history.
  fn add_household_image(
    &self,
    household_id: Uuid,
    media_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The most recently attached household image, if any.
  fn latest_household_image(
    &self,
    household_id: Uuid,
  ) -> impl Future<Output = Result<Option<MediaItem>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  fn create_user(
    &self,
    input: NewUserRecord,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;
}
