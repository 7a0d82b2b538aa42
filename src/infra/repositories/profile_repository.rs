//! Client and seller profile repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{ClientProfile, NewClientProfile, NewSellerProfile, SellerProfile};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Client profile linked to the given account
    async fn find_client_by_user(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>>;

    /// Seller profile linked to the given account
    async fn find_seller_by_user(&self, user_id: Uuid) -> AppResult<Option<SellerProfile>>;

    async fn create_client(&self, profile: NewClientProfile) -> AppResult<ClientProfile>;

    async fn create_seller(&self, profile: NewSellerProfile) -> AppResult<SellerProfile>;
}

pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };
    use uuid::Uuid;

    use crate::domain::{ClientProfile, NewClientProfile, NewSellerProfile, SellerProfile};
    use crate::errors::{AppError, AppResult};
    use crate::infra::repositories::entities::{client_profile, seller_profile};

    const PROFILE_TAKEN: &str = "a profile with this email or national id already exists";

    // Profiles reference users loosely, so the lowest id wins if several
    // point at the same account.
    pub async fn find_client_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> AppResult<Option<ClientProfile>> {
        let model = client_profile::Entity::find()
            .filter(client_profile::Column::UserId.eq(user_id))
            .order_by_asc(client_profile::Column::Id)
            .one(db)
            .await?;

        Ok(model.map(ClientProfile::from))
    }

    pub async fn find_seller_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> AppResult<Option<SellerProfile>> {
        let model = seller_profile::Entity::find()
            .filter(seller_profile::Column::UserId.eq(user_id))
            .order_by_asc(seller_profile::Column::Id)
            .one(db)
            .await?;

        Ok(model.map(SellerProfile::from))
    }

    pub async fn create_client<C: ConnectionTrait>(
        db: &C,
        profile: NewClientProfile,
    ) -> AppResult<ClientProfile> {
        let active_model = client_profile::ActiveModel {
            user_id: Set(profile.user_id),
            name: Set(profile.name),
            surname: Set(profile.surname),
            phone: Set(profile.phone),
            email: Set(profile.email),
            address: Set(profile.address),
            national_id: Set(profile.national_id),
            ..Default::default()
        };

        let model = active_model
            .insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, PROFILE_TAKEN))?;

        Ok(ClientProfile::from(model))
    }

    pub async fn create_seller<C: ConnectionTrait>(
        db: &C,
        profile: NewSellerProfile,
    ) -> AppResult<SellerProfile> {
        let active_model = seller_profile::ActiveModel {
            user_id: Set(profile.user_id),
            name: Set(profile.name),
            surname: Set(profile.surname),
            phone: Set(profile.phone),
            email: Set(profile.email),
            zone: Set(profile.zone),
            national_id: Set(profile.national_id),
            ..Default::default()
        };

        let model = active_model
            .insert(db)
            .await
            .map_err(|e| AppError::from_insert(e, PROFILE_TAKEN))?;

        Ok(SellerProfile::from(model))
    }
}

pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_client_by_user(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>> {
        query::find_client_by_user(&self.db, user_id).await
    }

    async fn find_seller_by_user(&self, user_id: Uuid) -> AppResult<Option<SellerProfile>> {
        query::find_seller_by_user(&self.db, user_id).await
    }

    async fn create_client(&self, profile: NewClientProfile) -> AppResult<ClientProfile> {
        query::create_client(&self.db, profile).await
    }

    async fn create_seller(&self, profile: NewSellerProfile) -> AppResult<SellerProfile> {
        query::create_seller(&self.db, profile).await
    }
}
