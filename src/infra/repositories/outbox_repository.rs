//! Notification outbox repository.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::OutboxMessage;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    async fn enqueue(&self, user_id: Uuid, message: String) -> AppResult<OutboxMessage>;

    /// Up to `limit` messages not yet handed to the job queue, oldest first.
    async fn fetch_unrelayed(&self, limit: u64) -> AppResult<Vec<OutboxMessage>>;

    async fn mark_relayed(&self, id: Uuid) -> AppResult<()>;

    /// All messages addressed to a user, oldest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<OutboxMessage>>;
}

pub(crate) mod query {
    use sea_orm::sea_query::Expr;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
        QuerySelect, Set,
    };
    use uuid::Uuid;

    use crate::domain::OutboxMessage;
    use crate::errors::AppResult;
    use crate::infra::repositories::entities::notification_outbox::{
        ActiveModel, Column, Entity as OutboxEntity,
    };

    pub async fn enqueue<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
        message: String,
    ) -> AppResult<OutboxMessage> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            message: Set(message),
            created_at: Set(chrono::Utc::now()),
            relayed_at: Set(None),
        };

        let model = active_model.insert(db).await?;
        Ok(OutboxMessage::from(model))
    }

    pub async fn fetch_unrelayed<C: ConnectionTrait>(
        db: &C,
        limit: u64,
    ) -> AppResult<Vec<OutboxMessage>> {
        let models = OutboxEntity::find()
            .filter(Column::RelayedAt.is_null())
            .order_by_asc(Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(OutboxMessage::from).collect())
    }

    pub async fn mark_relayed<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<()> {
        OutboxEntity::update_many()
            .col_expr(Column::RelayedAt, Expr::value(chrono::Utc::now()))
            .filter(Column::Id.eq(id))
            .filter(Column::RelayedAt.is_null())
            .exec(db)
            .await?;

        Ok(())
    }

    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> AppResult<Vec<OutboxMessage>> {
        let models = OutboxEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(OutboxMessage::from).collect())
    }
}

pub struct OutboxStore {
    db: DatabaseConnection,
}

impl OutboxStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OutboxRepository for OutboxStore {
    async fn enqueue(&self, user_id: Uuid, message: String) -> AppResult<OutboxMessage> {
        query::enqueue(&self.db, user_id, message).await
    }

    async fn fetch_unrelayed(&self, limit: u64) -> AppResult<Vec<OutboxMessage>> {
        query::fetch_unrelayed(&self.db, limit).await
    }

    async fn mark_relayed(&self, id: Uuid) -> AppResult<()> {
        query::mark_relayed(&self.db, id).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<OutboxMessage>> {
        query::list_for_user(&self.db, user_id).await
    }
}
