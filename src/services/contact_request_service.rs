//! Contact request workflow.
//!
//! A client opens a request, sellers see every pending request, and the
//! first seller to accept it wins. Acceptance snapshots the client's profile
//! as a mobile/local client and queues a notification for the client, all in
//! one transaction. Processed requests are then deleted or kept according to
//! the configured `RetentionPolicy`.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MESSAGE_REQUEST_ACCEPTED;
use crate::domain::{
    ContactRequest, MobileLocalClient, NewMobileLocalClient, RequestStatus, RetentionPolicy,
    UserRole,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const CLIENT_PROFILE_MISSING: &str = "client profile not found";
const NO_ACTIVE_REQUEST: &str = "no active contact request";
const SELLER_PROFILE_MISSING: &str = "seller profile not found";
const REQUEST_UNAVAILABLE: &str = "contact request not found or already processed";
const CLIENT_MISSING: &str = "client not found";
const NO_SNAPSHOT_FOR_NATIONAL_ID: &str = "no mobile client with this national id";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRequestService: Send + Sync {
    /// Open a pending request owned by the caller.
    async fn create_request(&self, user_id: Uuid) -> AppResult<ContactRequest>;

    /// Withdraw the caller's own pending request. Clients only.
    async fn cancel_request(&self, user_id: Uuid, role: UserRole) -> AppResult<()>;

    /// Sellers get every pending request, clients get their own requests in
    /// any status. Newest first.
    async fn list_pending(&self, user_id: Uuid, role: UserRole) -> AppResult<Vec<ContactRequest>>;

    /// Take a pending request. Sellers only; exactly one concurrent caller
    /// succeeds.
    async fn accept_request(&self, user_id: Uuid, role: UserRole, request_id: i32)
        -> AppResult<()>;

    /// Snapshots taken on acceptance for a national id, oldest first.
    /// Sellers and administrators only.
    async fn snapshots_by_national_id(
        &self,
        role: UserRole,
        national_id: String,
    ) -> AppResult<Vec<MobileLocalClient>>;
}

/// UnitOfWork-backed ContactRequestService
pub struct ContactRequestManager<U: UnitOfWork> {
    uow: Arc<U>,
    retention: RetentionPolicy,
}

impl<U: UnitOfWork> ContactRequestManager<U> {
    pub fn new(uow: Arc<U>, retention: RetentionPolicy) -> Self {
        Self { uow, retention }
    }
}

#[async_trait]
impl<U: UnitOfWork> ContactRequestService for ContactRequestManager<U> {
    async fn create_request(&self, user_id: Uuid) -> AppResult<ContactRequest> {
        let requests = self.uow.contact_requests();

        // The partial unique index settles races; this only gives the common
        // case a clean error.
        if requests.find_pending_for_user(user_id).await?.is_some() {
            return Err(AppError::conflict("a pending contact request already exists"));
        }

        let request = requests.create(user_id).await?;
        tracing::info!(request_id = request.id, %user_id, "Contact request opened");
        Ok(request)
    }

    async fn cancel_request(&self, user_id: Uuid, role: UserRole) -> AppResult<()> {
        match role {
            UserRole::Client => {}
            UserRole::Administrator | UserRole::Seller => return Err(AppError::Forbidden),
        }

        self.uow
            .profiles()
            .find_client_by_user(user_id)
            .await?
            .ok_or_not_found(CLIENT_PROFILE_MISSING)?;

        let retention = self.retention;
        let request_id = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let requests = ctx.contact_requests();
                    let request = requests
                        .find_pending_for_user(user_id)
                        .await?
                        .ok_or_not_found(NO_ACTIVE_REQUEST)?;

                    let withdrawn = match retention {
                        RetentionPolicy::Delete => requests.delete(request.id).await?,
                        RetentionPolicy::Keep => requests.mark_cancelled(request.id).await?,
                    };
                    if !withdrawn {
                        return Err(AppError::not_found(NO_ACTIVE_REQUEST));
                    }

                    Ok(request.id)
                })
            })
            .await?;

        tracing::info!(request_id, %user_id, ?retention, "Contact request cancelled");
        Ok(())
    }

    async fn list_pending(&self, user_id: Uuid, role: UserRole) -> AppResult<Vec<ContactRequest>> {
        let requests = self.uow.contact_requests();

        match role {
            UserRole::Seller => requests.list_by_status(RequestStatus::Pending).await,
            UserRole::Client => requests.list_for_user(user_id).await,
            UserRole::Administrator => Err(AppError::Forbidden),
        }
    }

    async fn accept_request(
        &self,
        user_id: Uuid,
        role: UserRole,
        request_id: i32,
    ) -> AppResult<()> {
        match role {
            UserRole::Seller => {}
            UserRole::Administrator | UserRole::Client => return Err(AppError::Forbidden),
        }

        let seller = self
            .uow
            .profiles()
            .find_seller_by_user(user_id)
            .await?
            .ok_or_not_found(SELLER_PROFILE_MISSING)?;

        let request = self
            .uow
            .contact_requests()
            .find_pending(request_id)
            .await?
            .ok_or_not_found(REQUEST_UNAVAILABLE)?;

        let client = self
            .uow
            .profiles()
            .find_client_by_user(request.user_id)
            .await?
            .ok_or_not_found(CLIENT_MISSING)?;

        let retention = self.retention;
        let seller_id = seller.id;
        let owner_id = request.user_id;

        let snapshot_id = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let snapshot = ctx
                        .mobile_clients()
                        .create(NewMobileLocalClient::snapshot_of(&client))
                        .await?;

                    // Losing the race rolls the snapshot back with it.
                    if !ctx
                        .contact_requests()
                        .mark_accepted(request_id, seller_id)
                        .await?
                    {
                        return Err(AppError::not_found(REQUEST_UNAVAILABLE));
                    }

                    ctx.outbox()
                        .enqueue(owner_id, MESSAGE_REQUEST_ACCEPTED.to_string())
                        .await?;

                    if retention == RetentionPolicy::Delete {
                        ctx.contact_requests().delete(request_id).await?;
                    }

                    Ok(snapshot.id)
                })
            })
            .await?;

        tracing::info!(
            request_id,
            seller_id,
            client_user_id = %owner_id,
            mobile_client_id = snapshot_id,
            "Contact request accepted"
        );
        Ok(())
    }

    async fn snapshots_by_national_id(
        &self,
        role: UserRole,
        national_id: String,
    ) -> AppResult<Vec<MobileLocalClient>> {
        match role {
            UserRole::Seller | UserRole::Administrator => {}
            UserRole::Client => return Err(AppError::Forbidden),
        }

        let national_id = national_id.trim();
        if national_id.is_empty() {
            return Err(AppError::validation("national_id is required"));
        }

        let snapshots = self
            .uow
            .mobile_clients()
            .list_by_national_id(national_id)
            .await?;
        if snapshots.is_empty() {
            return Err(AppError::not_found(NO_SNAPSHOT_FOR_NATIONAL_ID));
        }

        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientProfile, SellerProfile};
    use crate::services::test_support::{TestRepositories, TestUnitOfWork};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn pending(id: i32, user_id: Uuid) -> ContactRequest {
        ContactRequest {
            id,
            user_id,
            created_at: Utc::now(),
            status: RequestStatus::Pending,
            accepting_seller_id: None,
        }
    }

    fn seller_profile(user_id: Uuid) -> SellerProfile {
        SellerProfile {
            id: 3,
            user_id: Some(user_id),
            name: "Raúl".to_string(),
            surname: "Díaz".to_string(),
            phone: None,
            email: "raul@example.com".to_string(),
            zone: "Norte".to_string(),
            national_id: None,
        }
    }

    fn manager(repos: TestRepositories) -> ContactRequestManager<TestUnitOfWork> {
        ContactRequestManager::new(Arc::new(repos.into_uow()), RetentionPolicy::Delete)
    }

    #[tokio::test]
    async fn create_rejects_second_pending_request() {
        let user_id = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .contact_requests
            .expect_find_pending_for_user()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(pending(1, user_id))));
        repos.contact_requests.expect_create().never();

        let result = manager(repos).create_request(user_id).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn create_opens_pending_request() {
        let user_id = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .contact_requests
            .expect_find_pending_for_user()
            .returning(|_| Ok(None));
        repos
            .contact_requests
            .expect_create()
            .with(eq(user_id))
            .times(1)
            .returning(|owner| Ok(pending(42, owner)));

        let request = manager(repos).create_request(user_id).await.unwrap();

        assert_eq!(request.id, 42);
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.user_id, user_id);
    }

    #[tokio::test]
    async fn only_clients_may_cancel() {
        for role in [UserRole::Seller, UserRole::Administrator] {
            let mut repos = TestRepositories::default();
            repos.profiles.expect_find_client_by_user().never();

            let result = manager(repos).cancel_request(Uuid::new_v4(), role).await;
            assert!(matches!(result, Err(AppError::Forbidden)), "{role}");
        }
    }

    #[tokio::test]
    async fn cancel_without_client_profile_is_not_found() {
        let mut repos = TestRepositories::default();
        repos
            .profiles
            .expect_find_client_by_user()
            .returning(|_| Ok(None));

        let result = manager(repos)
            .cancel_request(Uuid::new_v4(), UserRole::Client)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(d)) if d == CLIENT_PROFILE_MISSING));
    }

    #[tokio::test]
    async fn sellers_list_all_pending_requests() {
        let seller = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .contact_requests
            .expect_list_by_status()
            .with(eq(RequestStatus::Pending))
            .returning(|_| Ok(vec![pending(2, Uuid::new_v4()), pending(1, Uuid::new_v4())]));
        repos.contact_requests.expect_list_for_user().never();

        let listed = manager(repos)
            .list_pending(seller, UserRole::Seller)
            .await
            .unwrap();

        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn clients_list_only_their_own_requests() {
        let client = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .contact_requests
            .expect_list_for_user()
            .with(eq(client))
            .returning(move |_| Ok(vec![pending(5, client)]));
        repos.contact_requests.expect_list_by_status().never();

        let listed = manager(repos)
            .list_pending(client, UserRole::Client)
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, client);
    }

    #[tokio::test]
    async fn administrators_cannot_list() {
        let result = manager(TestRepositories::default())
            .list_pending(Uuid::new_v4(), UserRole::Administrator)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn only_sellers_may_accept() {
        for role in [UserRole::Client, UserRole::Administrator] {
            let mut repos = TestRepositories::default();
            repos.profiles.expect_find_seller_by_user().never();

            let result = manager(repos)
                .accept_request(Uuid::new_v4(), role, 1)
                .await;
            assert!(matches!(result, Err(AppError::Forbidden)), "{role}");
        }
    }

    #[tokio::test]
    async fn accept_checks_seller_profile_first() {
        let mut repos = TestRepositories::default();
        repos
            .profiles
            .expect_find_seller_by_user()
            .returning(|_| Ok(None));
        repos.contact_requests.expect_find_pending().never();

        let result = manager(repos)
            .accept_request(Uuid::new_v4(), UserRole::Seller, 1)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(d)) if d == SELLER_PROFILE_MISSING));
    }

    #[tokio::test]
    async fn accept_of_processed_request_is_not_found() {
        let seller = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .profiles
            .expect_find_seller_by_user()
            .returning(|user_id| Ok(Some(seller_profile(user_id))));
        repos
            .contact_requests
            .expect_find_pending()
            .with(eq(77))
            .returning(|_| Ok(None));
        repos.profiles.expect_find_client_by_user().never();

        let result = manager(repos)
            .accept_request(seller, UserRole::Seller, 77)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(d)) if d == REQUEST_UNAVAILABLE));
    }

    #[tokio::test]
    async fn accept_without_client_profile_is_not_found() {
        let owner = Uuid::new_v4();
        let mut repos = TestRepositories::default();
        repos
            .profiles
            .expect_find_seller_by_user()
            .returning(|user_id| Ok(Some(seller_profile(user_id))));
        repos
            .contact_requests
            .expect_find_pending()
            .returning(move |id| Ok(Some(pending(id, owner))));
        repos
            .profiles
            .expect_find_client_by_user()
            .with(eq(owner))
            .returning(|_| Ok(None::<ClientProfile>));
        repos.mobile_clients.expect_create().never();

        let result = manager(repos)
            .accept_request(Uuid::new_v4(), UserRole::Seller, 8)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(d)) if d == CLIENT_MISSING));
    }

    fn snapshot(id: i32, national_id: &str) -> MobileLocalClient {
        MobileLocalClient {
            id,
            name: "Ana".to_string(),
            surname: "Gómez".to_string(),
            phone: None,
            email: None,
            address: None,
            national_id: national_id.to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn snapshot_lookup_trims_national_id() {
        let mut repos = TestRepositories::default();
        repos
            .mobile_clients
            .expect_list_by_national_id()
            .withf(|national_id: &str| national_id == "30111222")
            .returning(|national_id| Ok(vec![snapshot(1, national_id), snapshot(2, national_id)]));

        let found = manager(repos)
            .snapshots_by_national_id(UserRole::Seller, " 30111222 ".to_string())
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_lookup_rules() {
        let result = manager(TestRepositories::default())
            .snapshots_by_national_id(UserRole::Client, "30111222".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));

        let result = manager(TestRepositories::default())
            .snapshots_by_national_id(UserRole::Administrator, "  ".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let mut repos = TestRepositories::default();
        repos
            .mobile_clients
            .expect_list_by_national_id()
            .returning(|_| Ok(vec![]));
        let result = manager(repos)
            .snapshots_by_national_id(UserRole::Seller, "99999999".to_string())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(d)) if d == NO_SNAPSHOT_FOR_NATIONAL_ID));
    }
}
