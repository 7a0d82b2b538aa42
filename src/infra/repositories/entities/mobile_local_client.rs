//! Mobile/local client snapshot entity.

use sea_orm::entity::prelude::*;

use crate::domain::MobileLocalClient;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mobile_local_clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub national_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MobileLocalClient {
    fn from(model: Model) -> Self {
        MobileLocalClient {
            id: model.id,
            name: model.name,
            surname: model.surname,
            phone: model.phone,
            email: model.email,
            address: model.address,
            national_id: model.national_id,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}
