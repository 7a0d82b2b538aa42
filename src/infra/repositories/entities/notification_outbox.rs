//! Notification outbox entity.

use sea_orm::entity::prelude::*;

use crate::domain::OutboxMessage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notification_outbox")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub created_at: DateTimeUtc,
    pub relayed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OutboxMessage {
    fn from(model: Model) -> Self {
        OutboxMessage {
            id: model.id,
            user_id: model.user_id,
            message: model.message,
            created_at: model.created_at,
            relayed_at: model.relayed_at,
        }
    }
}
