//! Application services layer - Use cases and business logic.
//!
//! Services depend on the `UnitOfWork` abstraction for repository access and
//! transactions, and are exposed to the API as trait objects.

mod auth_service;
mod contact_request_service;
pub mod container;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{
    generate_token, AuthService, Authenticator, Claims, Registration, TokenResponse,
};
pub use contact_request_service::{ContactRequestManager, ContactRequestService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use contact_request_service::MockContactRequestService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
