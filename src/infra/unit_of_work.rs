//! Unit of Work: repository access and transaction management.
//!
//! Outside a transaction, services reach repositories through the
//! `UnitOfWork` accessors (pooled connection). Inside `transaction`, the
//! closure receives a `TransactionContext` whose repositories all run on the
//! same database transaction; it commits when the closure returns `Ok` and
//! rolls back otherwise.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    contact_request_query, mobile_client_query, outbox_query, profile_query, user_query,
    ContactRequestRepository, ContactRequestStore, MobileClientRepository, MobileClientStore,
    OutboxRepository, OutboxStore, ProfileRepository, ProfileStore, UserRepository, UserStore,
};
use crate::domain::{
    ClientProfile, ContactRequest, MobileLocalClient, NewClientProfile, NewMobileLocalClient,
    NewSellerProfile, NewUser, OutboxMessage, SellerProfile, User,
};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods; tests
/// implement it over mocked repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    fn contact_requests(&self) -> Arc<dyn ContactRequestRepository>;

    fn mobile_clients(&self) -> Arc<dyn MobileClientRepository>;

    fn outbox(&self) -> Arc<dyn OutboxRepository>;

    /// Run `f` in a ReadCommitted transaction.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Run `f` in a Serializable transaction.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn profiles(&self) -> TxProfileRepository<'_> {
        TxProfileRepository { txn: self.txn }
    }

    pub fn contact_requests(&self) -> TxContactRequestRepository<'_> {
        TxContactRequestRepository { txn: self.txn }
    }

    pub fn mobile_clients(&self) -> TxMobileClientRepository<'_> {
        TxMobileClientRepository { txn: self.txn }
    }

    pub fn outbox(&self) -> TxOutboxRepository<'_> {
        TxOutboxRepository { txn: self.txn }
    }
}

/// SeaORM-backed UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    profile_repo: Arc<ProfileStore>,
    contact_request_repo: Arc<ContactRequestStore>,
    mobile_client_repo: Arc<MobileClientStore>,
    outbox_repo: Arc<OutboxStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db.clone())),
            contact_request_repo: Arc::new(ContactRequestStore::new(db.clone())),
            mobile_client_repo: Arc::new(MobileClientStore::new(db.clone())),
            outbox_repo: Arc::new(OutboxStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }

    fn contact_requests(&self) -> Arc<dyn ContactRequestRepository> {
        self.contact_request_repo.clone()
    }

    fn mobile_clients(&self) -> Arc<dyn MobileClientRepository> {
        self.mobile_client_repo.clone()
    }

    fn outbox(&self) -> Arc<dyn OutboxRepository> {
        self.outbox_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-scoped user repository
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    pub async fn create(&self, user: NewUser) -> AppResult<User> {
        user_query::create(self.txn, user).await
    }

    pub async fn any_exists(&self) -> AppResult<bool> {
        user_query::any_exists(self.txn).await
    }
}

/// Transaction-scoped profile repository
pub struct TxProfileRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxProfileRepository<'_> {
    pub async fn create_client(&self, profile: NewClientProfile) -> AppResult<ClientProfile> {
        profile_query::create_client(self.txn, profile).await
    }

    pub async fn create_seller(&self, profile: NewSellerProfile) -> AppResult<SellerProfile> {
        profile_query::create_seller(self.txn, profile).await
    }
}

/// Transaction-scoped contact request repository
pub struct TxContactRequestRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxContactRequestRepository<'_> {
    pub async fn find_pending_for_user(&self, user_id: Uuid) -> AppResult<Option<ContactRequest>> {
        contact_request_query::find_pending_for_user(self.txn, user_id).await
    }

    /// `false` when the request was no longer pending.
    pub async fn mark_accepted(&self, id: i32, seller_id: i32) -> AppResult<bool> {
        contact_request_query::mark_accepted(self.txn, id, seller_id).await
    }

    pub async fn mark_cancelled(&self, id: i32) -> AppResult<bool> {
        contact_request_query::mark_cancelled(self.txn, id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        contact_request_query::delete(self.txn, id).await
    }
}

/// Transaction-scoped mobile client repository
pub struct TxMobileClientRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxMobileClientRepository<'_> {
    pub async fn create(&self, client: NewMobileLocalClient) -> AppResult<MobileLocalClient> {
        mobile_client_query::create(self.txn, client).await
    }
}

/// Transaction-scoped outbox repository
pub struct TxOutboxRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxOutboxRepository<'_> {
    pub async fn enqueue(&self, user_id: Uuid, message: String) -> AppResult<OutboxMessage> {
        outbox_query::enqueue(self.txn, user_id, message).await
    }
}
