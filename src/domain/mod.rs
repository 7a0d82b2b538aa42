//! Domain layer - Core business entities and logic
//!
//! Entities and value objects for accounts, profiles, contact requests and
//! their side effects. No persistence or HTTP concerns live here.

pub mod contact_request;
pub mod mobile_client;
pub mod notification;
pub mod password;
pub mod profile;
pub mod user;

pub use contact_request::{
    ContactRequest, ContactRequestSummary, CreatedRequestResponse, RequestStatus,
    RetentionPolicy,
};
pub use mobile_client::{MobileLocalClient, NewMobileLocalClient};
pub use notification::{NotificationResponse, OutboxMessage};
pub use password::Password;
pub use profile::{ClientProfile, NewClientProfile, NewSellerProfile, SellerProfile};
pub use user::{CurrentUserResponse, NewUser, UnknownRole, User, UserResponse, UserRole};
