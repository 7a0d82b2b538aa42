//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management
//! - Outbound notification dispatchers

pub mod db;
pub mod notifier;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use notifier::{
    dispatcher_from_config, DispatchError, LogDispatcher, NotificationDispatcher,
    WebhookDispatcher,
};
pub use repositories::{
    ContactRequestRepository, MobileClientRepository, OutboxRepository, OutboxStore,
    ProfileRepository, UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotificationDispatcher;
