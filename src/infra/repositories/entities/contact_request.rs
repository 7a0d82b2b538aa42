//! Contact request entity.

use sea_orm::entity::prelude::*;

use crate::domain::{ContactRequest, RequestStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contact_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub status: String,
    pub accepting_seller_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ContactRequest {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status: RequestStatus = model.status.parse().map_err(AppError::internal)?;

        Ok(ContactRequest {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at,
            status,
            accepting_seller_id: model.accepting_seller_id,
        })
    }
}
