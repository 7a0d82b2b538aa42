//! User service: the caller's own account view and notifications.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CurrentUserResponse, OutboxMessage, UserRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Account details merged with the role's profile, if one exists.
    async fn current_user(&self, id: Uuid) -> AppResult<CurrentUserResponse>;

    /// Notifications addressed to the user, oldest first, whether or not
    /// they have been delivered yet.
    async fn notifications(&self, id: Uuid) -> AppResult<Vec<OutboxMessage>>;
}

/// UnitOfWork-backed UserService
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn current_user(&self, id: Uuid) -> AppResult<CurrentUserResponse> {
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found("user not found")?;

        let (name, surname, national_id) = match user.role {
            UserRole::Client => self
                .uow
                .profiles()
                .find_client_by_user(user.id)
                .await?
                .map(|p| (p.name, p.surname, p.national_id)),
            UserRole::Seller => self
                .uow
                .profiles()
                .find_seller_by_user(user.id)
                .await?
                .map(|p| (p.name, p.surname, p.national_id)),
            UserRole::Administrator => None,
        }
        .map(|(name, surname, national_id)| (name, surname, national_id.unwrap_or_default()))
        .unwrap_or_default();

        Ok(CurrentUserResponse {
            id: user.id,
            email: user.email,
            role: user.role,
            name,
            surname,
            national_id,
        })
    }

    async fn notifications(&self, id: Uuid) -> AppResult<Vec<OutboxMessage>> {
        self.uow.outbox().list_for_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientProfile, SellerProfile, User};
    use crate::errors::AppError;
    use crate::services::test_support::{user_with_role, TestRepositories};
    use mockall::predicate::eq;

    fn client_profile(user: &User) -> ClientProfile {
        ClientProfile {
            id: 1,
            user_id: Some(user.id),
            name: "Ana".to_string(),
            surname: "Gómez".to_string(),
            phone: None,
            email: Some(user.email.clone()),
            address: None,
            national_id: Some("30111222".to_string()),
        }
    }

    #[tokio::test]
    async fn client_sees_profile_fields() {
        let user = user_with_role(UserRole::Client);
        let profile = client_profile(&user);
        let mut repos = TestRepositories::default();

        let found = user.clone();
        repos.users
            .expect_find_by_id()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(found.clone())));
        repos.profiles
            .expect_find_client_by_user()
            .with(eq(user.id))
            .returning(move |_| Ok(Some(profile.clone())));

        let service = UserManager::new(Arc::new(repos.into_uow()));
        let me = service.current_user(user.id).await.unwrap();

        assert_eq!(me.name, "Ana");
        assert_eq!(me.surname, "Gómez");
        assert_eq!(me.national_id, "30111222");
        assert_eq!(me.role, UserRole::Client);
    }

    #[tokio::test]
    async fn seller_without_national_id_gets_empty_string() {
        let user = user_with_role(UserRole::Seller);
        let profile = SellerProfile {
            id: 9,
            user_id: Some(user.id),
            name: "Raúl".to_string(),
            surname: "Díaz".to_string(),
            phone: None,
            email: user.email.clone(),
            zone: "Norte".to_string(),
            national_id: None,
        };
        let mut repos = TestRepositories::default();

        let found = user.clone();
        repos.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repos.profiles
            .expect_find_seller_by_user()
            .returning(move |_| Ok(Some(profile.clone())));

        let service = UserManager::new(Arc::new(repos.into_uow()));
        let me = service.current_user(user.id).await.unwrap();

        assert_eq!(me.name, "Raúl");
        assert_eq!(me.national_id, "");
    }

    #[tokio::test]
    async fn administrator_has_no_profile_lookup() {
        let user = user_with_role(UserRole::Administrator);
        let mut repos = TestRepositories::default();

        let found = user.clone();
        repos.users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        repos.profiles.expect_find_client_by_user().never();
        repos.profiles.expect_find_seller_by_user().never();

        let service = UserManager::new(Arc::new(repos.into_uow()));
        let me = service.current_user(user.id).await.unwrap();

        assert_eq!(me.name, "");
        assert_eq!(me.surname, "");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let mut repos = TestRepositories::default();
        repos.users.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repos.into_uow()));
        let result = service.current_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn notifications_come_from_the_outbox() {
        let user_id = Uuid::new_v4();
        let message = OutboxMessage {
            id: Uuid::new_v4(),
            user_id,
            message: "Your contact request was accepted".to_string(),
            created_at: chrono::Utc::now(),
            relayed_at: None,
        };
        let mut repos = TestRepositories::default();
        let stored = message.clone();
        repos
            .outbox
            .expect_list_for_user()
            .with(eq(user_id))
            .returning(move |_| Ok(vec![stored.clone()]));

        let service = UserManager::new(Arc::new(repos.into_uow()));

        assert_eq!(service.notifications(user_id).await.unwrap(), vec![message]);
    }
}
