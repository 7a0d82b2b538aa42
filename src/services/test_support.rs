//! Mock-backed UnitOfWork for service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockContactRequestRepository, MockMobileClientRepository, MockOutboxRepository,
    MockProfileRepository, MockUserRepository,
};
use crate::infra::{
    ContactRequestRepository, MobileClientRepository, OutboxRepository, ProfileRepository,
    TransactionContext, TxFuture, UnitOfWork, UserRepository,
};

pub fn user_with_role(role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role),
        password_hash: "hashed".to_string(),
        role,
        is_active: true,
        is_staff: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Expectations are set on the public mocks, then frozen with `into_uow`.
#[derive(Default)]
pub struct TestRepositories {
    pub users: MockUserRepository,
    pub profiles: MockProfileRepository,
    pub contact_requests: MockContactRequestRepository,
    pub mobile_clients: MockMobileClientRepository,
    pub outbox: MockOutboxRepository,
}

impl TestRepositories {
    pub fn into_uow(self) -> TestUnitOfWork {
        TestUnitOfWork {
            users: Arc::new(self.users),
            profiles: Arc::new(self.profiles),
            contact_requests: Arc::new(self.contact_requests),
            mobile_clients: Arc::new(self.mobile_clients),
            outbox: Arc::new(self.outbox),
        }
    }
}

/// Repository reads go to the mocks; transactions are refused, so any path
/// reaching one fails with `Internal`.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    profiles: Arc<MockProfileRepository>,
    contact_requests: Arc<MockContactRequestRepository>,
    mobile_clients: Arc<MockMobileClientRepository>,
    outbox: Arc<MockOutboxRepository>,
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn contact_requests(&self) -> Arc<dyn ContactRequestRepository> {
        self.contact_requests.clone()
    }

    fn mobile_clients(&self) -> Arc<dyn MobileClientRepository> {
        self.mobile_clients.clone()
    }

    fn outbox(&self) -> Arc<dyn OutboxRepository> {
        self.outbox.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
