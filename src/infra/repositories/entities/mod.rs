//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod client_profile;
pub mod contact_request;
pub mod mobile_local_client;
pub mod notification_outbox;
pub mod seller_profile;
pub mod user;
