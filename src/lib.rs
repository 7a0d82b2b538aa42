//! Storefront API
//!
//! Clients open contact requests; sellers and administrators accept them.
//! Accepting a request snapshots the client into the mobile-client list and
//! records a notification in the outbox, all in one transaction.
//!
//! # Layers
//!
//! - **cli** / **commands**: command-line entry points
//! - **config**: environment configuration and constants
//! - **domain**: entities and value types
//! - **services**: use cases behind traits
//! - **infra**: database, repositories, unit of work, notification dispatch
//! - **jobs**: outbox relay and notification delivery worker
//! - **api**: axum handlers, middleware and routes
//! - **types**: shared response wrappers
//! - **errors**: `AppError` and its HTTP mapping
//!
//! ```bash
//! storefront-api migrate up
//! storefront-api serve
//! storefront-api jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{ContactRequest, Password, RequestStatus, User, UserRole};
pub use errors::{AppError, AppResult};
