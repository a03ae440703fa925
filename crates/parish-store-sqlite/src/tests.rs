//! Integration tests for `SqliteStore` against an in-memory database, plus
//! the core services run end-to-end over it.

use std::{
  collections::HashMap,
  io,
  sync::{Arc, Mutex},
};

use parish_core::{
  address::{AddressKind, NewAddress},
  auth::{PasswordHasher, TokenIssuer},
  household::{HouseholdUpdate, NewHousehold},
  media::{MediaStorage, StorageBackend},
  person::{
    NewPerson, PersonFields, PersonUpdate, SocialMediaKind,
    SocialMediaLinkInput,
  },
  service::{
    AddressService, AuthService, HouseholdService, LoginProvisioning,
    MediaService, PeopleService, UserService,
  },
  store::DirectoryStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn fields(first: &str, last: &str) -> PersonFields {
  PersonFields {
    first_name:      first.to_string(),
    last_name:       last.to_string(),
    email:           format!("{}@example.com", first.to_lowercase()),
    mobile_number:   "0821234567".to_string(),
    date_of_birth:   None,
    gender:          None,
    marriage_date:   None,
    marital_status:  None,
    registered_date: None,
  }
}

fn new_address() -> NewAddress {
  NewAddress {
    kind:          AddressKind::Home,
    street_number: "12".to_string(),
    street:        "Church Street".to_string(),
    suburb:        "Gardens".to_string(),
    city:          "Cape Town".to_string(),
    province:      "Western Cape".to_string(),
    country:       "South Africa".to_string(),
    postal_code:   Some("8001".to_string()),
    latitude:      None,
    longitude:     None,
  }
}

/// Reversible "hash" for tests; production wiring uses argon2.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
  fn hash(&self, plaintext: &str) -> parish_core::Result<String> {
    Ok(format!("plain:{plaintext}"))
  }

  fn verify(&self, plaintext: &str, hash: &str) -> parish_core::Result<bool> {
    Ok(hash == format!("plain:{plaintext}"))
  }
}

struct PrefixTokens;

impl TokenIssuer for PrefixTokens {
  fn issue(&self, subject: &str) -> parish_core::Result<String> {
    Ok(format!("token:{subject}"))
  }

  fn decode(&self, token: &str) -> parish_core::Result<String> {
    token
      .strip_prefix("token:")
      .map(str::to_string)
      .ok_or_else(|| parish_core::Error::Auth("bad token".to_string()))
  }
}

#[derive(Default)]
struct MemStorage {
  blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MediaStorage for MemStorage {
  fn put(&self, filename: &str, bytes: &[u8]) -> io::Result<String> {
    self
      .blobs
      .lock()
      .unwrap()
      .insert(filename.to_string(), bytes.to_vec());
    Ok(filename.to_string())
  }

  fn get(&self, location: &str) -> io::Result<Vec<u8>> {
    self
      .blobs
      .lock()
      .unwrap()
      .get(location)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, location.to_string()))
  }
}

struct Services {
  store:      Arc<SqliteStore>,
  people:     PeopleService<SqliteStore>,
  households: HouseholdService<SqliteStore>,
  addresses:  AddressService<SqliteStore>,
  users:      UserService<SqliteStore>,
  auth:       AuthService<SqliteStore>,
}

async fn services() -> Services {
  let store = Arc::new(store().await);
  let hasher: Arc<dyn PasswordHasher> = Arc::new(PlainHasher);
  let tokens: Arc<dyn TokenIssuer> = Arc::new(PrefixTokens);

  let media = MediaService::new(
    store.clone(),
    Arc::new(MemStorage::default()),
    StorageBackend::Local,
  );
  let users = UserService::new(store.clone(), hasher.clone());
  let people = PeopleService::new(store.clone(), media, users.clone());
  let households = HouseholdService::new(store.clone());
  let addresses = AddressService::new(store.clone());
  let auth = AuthService::new(store.clone(), hasher, tokens);

  Services { store, people, households, addresses, users, auth }
}

// ─── People rows ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;

  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();
  assert_eq!(person.first_name, "Alice");

  let fetched = s.get_person(person.person_id).await.unwrap().unwrap();
  assert_eq!(fetched.person_id, person.person_id);
  assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_people_sorted_by_name() {
  let s = store().await;
  s.create_person(fields("Zanele", "Nkosi")).await.unwrap();
  s.create_person(fields("Alice", "Adams")).await.unwrap();
  s.create_person(fields("Bob", "Adams")).await.unwrap();

  let people = s.list_people().await.unwrap();
  let names: Vec<_> = people
    .iter()
    .map(|p| (p.last_name.as_str(), p.first_name.as_str()))
    .collect();
  assert_eq!(
    names,
    vec![("Adams", "Alice"), ("Adams", "Bob"), ("Nkosi", "Zanele")]
  );
}

#[tokio::test]
async fn update_person_overwrites_scalars() {
  let s = store().await;
  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();

  let mut updated = fields("Alicia", "Mokoena");
  updated.email = "alicia@example.com".to_string();
  s.update_person(person.person_id, updated).await.unwrap();

  let fetched = s.get_person(person.person_id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name, "Alicia");
  assert_eq!(fetched.email, "alicia@example.com");
  assert_eq!(fetched.created_at, person.created_at);
}

// ─── Social-media links ──────────────────────────────────────────────────────

#[tokio::test]
async fn social_links_create_list_delete() {
  let s = store().await;
  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();

  s.create_social_media_link(person.person_id, SocialMediaLinkInput {
    kind: SocialMediaKind::Facebook,
    url:  "https://facebook.com/alice".to_string(),
  })
  .await
  .unwrap();
  s.create_social_media_link(person.person_id, SocialMediaLinkInput {
    kind: SocialMediaKind::Linkedin,
    url:  "https://linkedin.com/in/alice".to_string(),
  })
  .await
  .unwrap();

  let links = s.social_media_links(person.person_id).await.unwrap();
  assert_eq!(links.len(), 2);
  assert_eq!(links[0].kind, SocialMediaKind::Facebook);

  s.delete_social_media_links(person.person_id).await.unwrap();
  assert!(s.social_media_links(person.person_id).await.unwrap().is_empty());
}

// ─── Addresses ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn address_round_trip_and_linking() {
  let s = store().await;
  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();

  let address = s.create_address(new_address()).await.unwrap();
  let fetched = s.get_address(address.address_id).await.unwrap().unwrap();
  assert_eq!(fetched.city, "Cape Town");
  assert_eq!(fetched.postal_code.as_deref(), Some("8001"));

  s.link_address_to_person(person.person_id, address.address_id)
    .await
    .unwrap();
  let linked = s.person_addresses(person.person_id).await.unwrap();
  assert_eq!(linked.len(), 1);
  assert_eq!(linked[0].address_id, address.address_id);

  s.unlink_person_addresses(person.person_id).await.unwrap();
  assert!(s.person_addresses(person.person_id).await.unwrap().is_empty());
  // the address row itself survives unlinking
  assert!(s.get_address(address.address_id).await.unwrap().is_some());
}

// ─── Household membership rows ───────────────────────────────────────────────

#[tokio::test]
async fn household_membership_add_and_remove() {
  let s = store().await;
  let p1 = s.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let p2 = s.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = s.create_address(new_address()).await.unwrap();

  let hh = s
    .create_household(p1.person_id, address.address_id)
    .await
    .unwrap();

  s.add_person_to_household(hh.household_id, p1.person_id)
    .await
    .unwrap();
  s.add_person_to_household(hh.household_id, p2.person_id)
    .await
    .unwrap();
  // duplicate adds are ignored
  s.add_person_to_household(hh.household_id, p2.person_id)
    .await
    .unwrap();

  let members = s.household_member_ids(hh.household_id).await.unwrap();
  assert_eq!(members, vec![p1.person_id, p2.person_id]);

  let memberships = s.household_ids_for_person(p2.person_id).await.unwrap();
  assert_eq!(memberships, vec![hh.household_id]);

  s.remove_person_from_household(hh.household_id, p2.person_id)
    .await
    .unwrap();
  let members = s.household_member_ids(hh.household_id).await.unwrap();
  assert_eq!(members, vec![p1.person_id]);
}

// ─── Media rows ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn person_image_history_newest_first() {
  let s = store().await;
  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();

  let first = s
    .create_media_item(parish_core::media::NewMediaItem {
      content_type: "image/jpeg".to_string(),
      description:  None,
      backend:      StorageBackend::Local,
      location:     "a.jpg".to_string(),
    })
    .await
    .unwrap();
  let second = s
    .create_media_item(parish_core::media::NewMediaItem {
      content_type: "image/png".to_string(),
      description:  None,
      backend:      StorageBackend::Local,
      location:     "b.png".to_string(),
    })
    .await
    .unwrap();

  s.add_person_image(person.person_id, first.media_id)
    .await
    .unwrap();
  s.add_person_image(person.person_id, second.media_id)
    .await
    .unwrap();

  let history = s.person_images(person.person_id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].media_id, second.media_id);

  let latest = s.latest_person_image(person.person_id).await.unwrap();
  assert_eq!(latest.unwrap().media_id, second.media_id);
}

#[tokio::test]
async fn reattached_older_image_becomes_current_again() {
  let s = store().await;
  let person = s.create_person(fields("Alice", "Mokoena")).await.unwrap();

  let first = s
    .create_media_item(parish_core::media::NewMediaItem {
      content_type: "image/jpeg".to_string(),
      description:  None,
      backend:      StorageBackend::Local,
      location:     "a.jpg".to_string(),
    })
    .await
    .unwrap();
  let second = s
    .create_media_item(parish_core::media::NewMediaItem {
      content_type: "image/png".to_string(),
      description:  None,
      backend:      StorageBackend::Local,
      location:     "b.png".to_string(),
    })
    .await
    .unwrap();

  s.add_person_image(person.person_id, first.media_id)
    .await
    .unwrap();
  s.add_person_image(person.person_id, second.media_id)
    .await
    .unwrap();
  // Re-attaching an earlier image appends a new history row.
  s.add_person_image(person.person_id, first.media_id)
    .await
    .unwrap();

  let history = s.person_images(person.person_id).await.unwrap();
  assert_eq!(history.len(), 3);
  assert_eq!(history[0].media_id, first.media_id);

  let latest = s.latest_person_image(person.person_id).await.unwrap();
  assert_eq!(latest.unwrap().media_id, first.media_id);
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_lookup_by_email() {
  let s = store().await;

  let user = s
    .create_user(parish_core::user::NewUserRecord {
      first_name:    "Alice".to_string(),
      last_name:     "Mokoena".to_string(),
      email:         "alice@example.com".to_string(),
      mobile_number: "0821234567".to_string(),
      password_hash: "plain:secret".to_string(),
      person_id:     None,
    })
    .await
    .unwrap();

  let by_email = s.get_user_by_email("alice@example.com").await.unwrap();
  assert_eq!(by_email.unwrap().user_id, user.user_id);
  assert!(s.get_user_by_email("nobody@example.com").await.unwrap().is_none());
}

// ─── Household service ───────────────────────────────────────────────────────

#[tokio::test]
async fn household_create_defaults_leader_to_first_member() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let p2 = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();

  let view = svc
    .households
    .create(NewHousehold {
      leader_id:  None,
      address_id: address.address_id,
      people_ids: vec![p1.person_id, p2.person_id],
      image_id:   None,
    })
    .await
    .unwrap();

  assert_eq!(view.household.leader_id, p1.person_id);
  assert_eq!(view.leader.person_id, p1.person_id);
  assert_eq!(view.members.len(), 2);
  assert_eq!(view.address.address_id, address.address_id);
}

#[tokio::test]
async fn household_create_rejects_outside_leader() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let outsider = svc.store.create_person(fields("Eve", "Dlamini")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();

  let err = svc
    .households
    .create(NewHousehold {
      leader_id:  Some(outsider.person_id),
      address_id: address.address_id,
      people_ids: vec![p1.person_id],
      image_id:   None,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    parish_core::Error::LeaderNotMember { person } if person == outsider.person_id
  ));
}

#[tokio::test]
async fn household_create_rejects_empty_member_list() {
  let svc = services().await;
  let address = svc.addresses.create(new_address()).await.unwrap();

  let err = svc
    .households
    .create(NewHousehold {
      leader_id:  None,
      address_id: address.address_id,
      people_ids: vec![],
      image_id:   None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, parish_core::Error::HouseholdHasNoMembers));
}

#[tokio::test]
async fn household_update_reconciles_membership() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let p2 = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let p3 = svc.store.create_person(fields("Carol", "Mokoena")).await.unwrap();
  let p4 = svc.store.create_person(fields("Dan", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();

  let view = svc
    .households
    .create(NewHousehold {
      leader_id:  Some(p1.person_id),
      address_id: address.address_id,
      people_ids: vec![p1.person_id, p2.person_id, p3.person_id],
      image_id:   None,
    })
    .await
    .unwrap();

  // {p1, p2, p3} -> {p1, p3, p4}: p4 joins, p2 leaves, p1 and p3 untouched
  let updated = svc
    .households
    .update(view.household.household_id, HouseholdUpdate {
      people_ids: Some(vec![p1.person_id, p3.person_id, p4.person_id]),
      ..Default::default()
    })
    .await
    .unwrap();

  let member_ids: Vec<_> =
    updated.members.iter().map(|m| m.person_id).collect();
  assert_eq!(member_ids, vec![p1.person_id, p3.person_id, p4.person_id]);
  assert_eq!(updated.household.leader_id, p1.person_id);
}

#[tokio::test]
async fn household_update_cannot_drop_leader_from_members() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let p2 = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();

  let view = svc
    .households
    .create(NewHousehold {
      leader_id:  Some(p1.person_id),
      address_id: address.address_id,
      people_ids: vec![p1.person_id, p2.person_id],
      image_id:   None,
    })
    .await
    .unwrap();
  let hh_id = view.household.household_id;

  let err = svc
    .households
    .update(hh_id, HouseholdUpdate {
      people_ids: Some(vec![p2.person_id]),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    parish_core::Error::CannotRemoveLeader { person, household }
      if person == p1.person_id && household == hh_id
  ));

  // membership is unchanged after the rejected update
  let after = svc.households.get(hh_id).await.unwrap();
  assert_eq!(after.members.len(), 2);
}

#[tokio::test]
async fn household_update_reassigns_leader_within_members() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Alice", "Mokoena")).await.unwrap();
  let p2 = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();

  let view = svc
    .households
    .create(NewHousehold {
      leader_id:  Some(p1.person_id),
      address_id: address.address_id,
      people_ids: vec![p1.person_id, p2.person_id],
      image_id:   None,
    })
    .await
    .unwrap();

  // hand leadership to p2, then p1 may leave
  svc
    .households
    .update(view.household.household_id, HouseholdUpdate {
      leader_id: Some(p2.person_id),
      ..Default::default()
    })
    .await
    .unwrap();

  let updated = svc
    .households
    .update(view.household.household_id, HouseholdUpdate {
      people_ids: Some(vec![p2.person_id]),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.household.leader_id, p2.person_id);
  assert_eq!(updated.members.len(), 1);
}

// ─── People service ──────────────────────────────────────────────────────────

#[tokio::test]
async fn person_create_with_inline_addresses_and_links() {
  let svc = services().await;

  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![SocialMediaLinkInput {
        kind: SocialMediaKind::Instagram,
        url:  "https://instagram.com/alice".to_string(),
      }],
      addresses:          vec![new_address()],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();

  assert!(matches!(created.login, LoginProvisioning::NotRequested));
  let view = created.person;
  assert_eq!(view.social_media_links.len(), 1);
  assert_eq!(view.addresses.len(), 1);
  // registered_date is defaulted when absent
  assert!(view.person.registered_date.is_some());
}

#[tokio::test]
async fn person_create_validates_households_before_writing() {
  let svc = services().await;

  let err = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![Uuid::new_v4()],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, parish_core::Error::HouseholdNotFound(_)));

  // nothing was persisted
  assert!(svc.store.list_people().await.unwrap().is_empty());
}

#[tokio::test]
async fn person_create_joins_named_households() {
  let svc = services().await;
  let p1 = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();
  let hh = svc
    .households
    .create(NewHousehold {
      leader_id:  None,
      address_id: address.address_id,
      people_ids: vec![p1.person_id],
      image_id:   None,
    })
    .await
    .unwrap();

  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![hh.household.household_id],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();

  assert_eq!(created.person.households.len(), 1);
  let members = svc
    .store
    .household_member_ids(hh.household.household_id)
    .await
    .unwrap();
  assert!(members.contains(&created.person.person.person_id));
}

#[tokio::test]
async fn person_update_replaces_links_wholesale() {
  let svc = services().await;
  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![
        SocialMediaLinkInput {
          kind: SocialMediaKind::Facebook,
          url:  "https://facebook.com/alice".to_string(),
        },
        SocialMediaLinkInput {
          kind: SocialMediaKind::Twitter,
          url:  "https://twitter.com/alice".to_string(),
        },
      ],
      addresses:          vec![],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();
  let id = created.person.person.person_id;

  let updated = svc
    .people
    .update(id, PersonUpdate {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![SocialMediaLinkInput {
        kind: SocialMediaKind::Tiktok,
        url:  "https://tiktok.com/@alice".to_string(),
      }],
      address_ids:        vec![],
      household_ids:      vec![],
      profile_image_id:   None,
    })
    .await
    .unwrap();

  assert_eq!(updated.social_media_links.len(), 1);
  assert_eq!(updated.social_media_links[0].kind, SocialMediaKind::Tiktok);
}

#[tokio::test]
async fn person_update_cannot_leave_household_they_lead() {
  let svc = services().await;
  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();
  let id = created.person.person.person_id;
  let address = svc.addresses.create(new_address()).await.unwrap();
  let hh = svc
    .households
    .create(NewHousehold {
      leader_id:  Some(id),
      address_id: address.address_id,
      people_ids: vec![id],
      image_id:   None,
    })
    .await
    .unwrap();
  let hh_id = hh.household.household_id;

  let err = svc
    .people
    .update(id, PersonUpdate {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      address_ids:        vec![],
      household_ids:      vec![],
      profile_image_id:   None,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    parish_core::Error::CannotRemoveLeader { person, household }
      if person == id && household == hh_id
  ));
}

#[tokio::test]
async fn person_update_reconciles_household_membership() {
  let svc = services().await;
  let leader = svc.store.create_person(fields("Bob", "Mokoena")).await.unwrap();
  let address = svc.addresses.create(new_address()).await.unwrap();
  let hh_a = svc
    .households
    .create(NewHousehold {
      leader_id:  None,
      address_id: address.address_id,
      people_ids: vec![leader.person_id],
      image_id:   None,
    })
    .await
    .unwrap();
  let hh_b = svc
    .households
    .create(NewHousehold {
      leader_id:  None,
      address_id: address.address_id,
      people_ids: vec![leader.person_id],
      image_id:   None,
    })
    .await
    .unwrap();

  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![hh_a.household.household_id],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();
  let id = created.person.person.person_id;

  // move from household A to household B
  let updated = svc
    .people
    .update(id, PersonUpdate {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      address_ids:        vec![],
      household_ids:      vec![hh_b.household.household_id],
      profile_image_id:   None,
    })
    .await
    .unwrap();

  let ids: Vec<_> =
    updated.households.iter().map(|h| h.household_id).collect();
  assert_eq!(ids, vec![hh_b.household.household_id]);
}

#[tokio::test]
async fn person_profile_image_upload_and_fetch() {
  let svc = services().await;
  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       false,
    })
    .await
    .unwrap();
  let id = created.person.person.person_id;

  let item = svc
    .people
    .upload_profile_image(id, "image/png", b"not really a png")
    .await
    .unwrap();
  assert_eq!(item.content_type, "image/png");

  let (current, bytes) = svc.people.profile_image(id).await.unwrap().unwrap();
  assert_eq!(current.media_id, item.media_id);
  assert_eq!(bytes, b"not really a png");

  let history = svc.people.profile_images(id).await.unwrap();
  assert_eq!(history.len(), 1);
}

// ─── Login provisioning and auth ─────────────────────────────────────────────

#[tokio::test]
async fn person_create_with_login_provisions_user() {
  let svc = services().await;

  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       true,
    })
    .await
    .unwrap();

  let user = match created.login {
    LoginProvisioning::Created(user) => user,
    other => panic!("expected provisioned login, got {other:?}"),
  };
  assert_eq!(user.email, "alice@example.com");
  assert_eq!(user.person_id, Some(created.person.person.person_id));
}

#[tokio::test]
async fn login_provisioning_failure_does_not_fail_create() {
  let svc = services().await;

  // a user already holds this email
  svc
    .users
    .create(parish_core::user::NewUser {
      first_name:    "Someone".to_string(),
      last_name:     "Else".to_string(),
      email:         "alice@example.com".to_string(),
      mobile_number: "0820000000".to_string(),
      password:      "secret".to_string(),
      person_id:     None,
    })
    .await
    .unwrap();

  let created = svc
    .people
    .create(NewPerson {
      fields:             fields("Alice", "Mokoena"),
      social_media_links: vec![],
      addresses:          vec![],
      household_ids:      vec![],
      profile_image_id:   None,
      create_login:       true,
    })
    .await
    .unwrap();

  assert!(matches!(created.login, LoginProvisioning::Failed(_)));
  // the person itself was still created
  assert!(
    svc
      .store
      .get_person(created.person.person.person_id)
      .await
      .unwrap()
      .is_some()
  );
}

#[tokio::test]
async fn login_issues_token_and_rejects_bad_password() {
  let svc = services().await;
  svc
    .users
    .create(parish_core::user::NewUser {
      first_name:    "Alice".to_string(),
      last_name:     "Mokoena".to_string(),
      email:         "alice@example.com".to_string(),
      mobile_number: "0821234567".to_string(),
      password:      "secret".to_string(),
      person_id:     None,
    })
    .await
    .unwrap();

  let response = svc.auth.login("alice@example.com", "secret").await.unwrap();
  assert_eq!(response.token_type, "bearer");
  assert_eq!(
    svc.auth.current_user(&response.access_token).unwrap(),
    "alice@example.com"
  );

  let err = svc
    .auth
    .login("alice@example.com", "wrong")
    .await
    .unwrap_err();
  assert!(matches!(err, parish_core::Error::InvalidCredentials));

  let err = svc.auth.login("nobody@example.com", "secret").await.unwrap_err();
  assert!(matches!(err, parish_core::Error::InvalidCredentials));
}
