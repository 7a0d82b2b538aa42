//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, ContactRequestService, ServiceContainer, Services, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub contact_request_service: Arc<dyn ContactRequestService>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build every service over the given database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    pub fn from_container(container: &impl ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            contact_request_service: container.contact_requests(),
            database,
        }
    }

    /// Create state with manually injected services (tests, embedding).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        contact_request_service: Arc<dyn ContactRequestService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            contact_request_service,
            database,
        }
    }
}
