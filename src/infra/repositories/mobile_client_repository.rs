//! Mobile/local client snapshot repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::{MobileLocalClient, NewMobileLocalClient};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MobileClientRepository: Send + Sync {
    async fn create(&self, client: NewMobileLocalClient) -> AppResult<MobileLocalClient>;

    /// Every snapshot taken for a national id, oldest first.
    async fn list_by_national_id(&self, national_id: &str) -> AppResult<Vec<MobileLocalClient>>;
}

pub(crate) mod query {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    };

    use crate::domain::{MobileLocalClient, NewMobileLocalClient};
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::mobile_local_client::{
        ActiveModel, Column, Entity as MobileLocalClientEntity,
    };

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        client: NewMobileLocalClient,
    ) -> AppResult<MobileLocalClient> {
        let active_model = ActiveModel {
            name: Set(client.name),
            surname: Set(client.surname),
            phone: Set(client.phone),
            email: Set(client.email),
            address: Set(client.address),
            national_id: Set(client.national_id),
            notes: Set(None),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(db).await?;
        Ok(MobileLocalClient::from(model))
    }

    pub async fn list_by_national_id<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> AppResult<Vec<MobileLocalClient>> {
        let models = MobileLocalClientEntity::find()
            .filter(Column::NationalId.eq(national_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(MobileLocalClient::from).collect())
    }
}

pub struct MobileClientStore {
    db: DatabaseConnection,
}

impl MobileClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MobileClientRepository for MobileClientStore {
    async fn create(&self, client: NewMobileLocalClient) -> AppResult<MobileLocalClient> {
        query::create(&self.db, client).await
    }

    async fn list_by_national_id(&self, national_id: &str) -> AppResult<Vec<MobileLocalClient>> {
        query::list_by_national_id(&self.db, national_id).await
    }
}
