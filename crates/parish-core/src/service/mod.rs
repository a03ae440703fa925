//! Aggregate services — validation, reconciliation, and persistence
//! orchestration over a [`DirectoryStore`](crate::store::DirectoryStore).
//!
//! Collaborators are injected through constructors; a thin composition
//! root in the server binary wires concrete implementations at startup.
//! Every service is cheap to clone (the store is reference-counted).

mod addresses;
mod households;
mod media;
mod people;
mod users;

pub use addresses::AddressService;
pub use households::HouseholdService;
pub use media::MediaService;
pub use people::{CreatedPerson, LoginProvisioning, PeopleService};
pub use users::{AuthService, UserService};
