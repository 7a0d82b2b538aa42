//! Repository layer - Data access abstraction
//!
//! Each repository exposes a trait (mockable under `test-utils`), a store
//! bound to the connection pool, and a `query` module of connection-generic
//! functions that the transaction-scoped repositories reuse.

pub(crate) mod entities;
mod contact_request_repository;
mod mobile_client_repository;
mod outbox_repository;
mod profile_repository;
mod user_repository;

pub(crate) use contact_request_repository::query as contact_request_query;
pub(crate) use mobile_client_repository::query as mobile_client_query;
pub(crate) use outbox_repository::query as outbox_query;
pub(crate) use profile_repository::query as profile_query;
pub(crate) use user_repository::query as user_query;

pub use contact_request_repository::{ContactRequestRepository, ContactRequestStore};
pub use mobile_client_repository::{MobileClientRepository, MobileClientStore};
pub use outbox_repository::{OutboxRepository, OutboxStore};
pub use profile_repository::{ProfileRepository, ProfileStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use contact_request_repository::MockContactRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use mobile_client_repository::MockMobileClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use outbox_repository::MockOutboxRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
