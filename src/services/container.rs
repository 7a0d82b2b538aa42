//! Service container: one place to build and reach every application service.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, ContactRequestManager, ContactRequestService, UserManager,
    UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn contact_requests(&self) -> Arc<dyn ContactRequestService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    contact_request_service: Arc<dyn ContactRequestService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        contact_request_service: Arc<dyn ContactRequestService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            contact_request_service,
        }
    }

    /// Wire every service over one shared UnitOfWork.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let retention = config.retention;

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            contact_request_service: Arc::new(ContactRequestManager::new(uow, retention)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn contact_requests(&self) -> Arc<dyn ContactRequestService> {
        self.contact_request_service.clone()
    }
}
